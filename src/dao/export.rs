// atelier: Desktop Project Manager
//
// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! SQL dump of a whole database, equivalent to sqlite's `.dump`:
//! schema objects from `sqlite_master` in creation order, then one INSERT
//! per table row, wrapped in a transaction.

use std::fmt::Write as _;

use rusqlite::Connection;
use rusqlite::types::Value;

/// Renders the database as executable SQL.
pub(super) fn dump(conn: &Connection) -> rusqlite::Result<String> {
    let mut out = String::from("BEGIN TRANSACTION;\n");

    let mut stmt = conn.prepare(
        "SELECT type, name, sql FROM sqlite_master \
         WHERE sql NOT NULL AND name NOT LIKE 'sqlite_%' \
         ORDER BY rowid",
    )?;
    let objects = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    for (kind, name, sql) in &objects {
        let _ = writeln!(out, "{sql};");
        if kind == "table" {
            dump_table_rows(conn, name, &mut out)?;
        }
    }

    out.push_str("COMMIT;\n");
    Ok(out)
}

fn dump_table_rows(conn: &Connection, table: &str, out: &mut String) -> rusqlite::Result<()> {
    // Identifiers cannot be bound as parameters; quote them instead.
    let mut stmt = conn.prepare(&format!("SELECT * FROM {}", quote_identifier(table)))?;
    let column_count = stmt.column_count();

    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let mut literals = Vec::with_capacity(column_count);
        for i in 0..column_count {
            literals.push(sql_literal(&row.get::<_, Value>(i)?));
        }
        let _ = writeln!(
            out,
            "INSERT INTO {} VALUES({});",
            quote_identifier(table),
            literals.join(",")
        );
    }
    Ok(())
}

/// Quotes an identifier, doubling embedded quotes.
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Renders a SQL value as a literal for an INSERT statement.
fn sql_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(r) => {
            // Keep reals round-trippable: always emit a decimal point.
            if r.fract() == 0.0 && r.is_finite() {
                format!("{r:.1}")
            } else {
                r.to_string()
            }
        }
        Value::Text(t) => format!("'{}'", t.replace('\'', "''")),
        Value::Blob(b) => {
            let mut hex = String::with_capacity(b.len() * 2 + 3);
            hex.push_str("X'");
            for byte in b {
                let _ = write!(hex, "{byte:02X}");
            }
            hex.push('\'');
            hex
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{quote_identifier, sql_literal};
    use rusqlite::types::Value;

    #[test]
    fn test_sql_literal_rendering() {
        assert_eq!(sql_literal(&Value::Null), "NULL");
        assert_eq!(sql_literal(&Value::Integer(-7)), "-7");
        assert_eq!(sql_literal(&Value::Real(2.0)), "2.0");
        assert_eq!(sql_literal(&Value::Real(1.5)), "1.5");
        assert_eq!(
            sql_literal(&Value::Text("it's".to_string())),
            "'it''s'"
        );
        assert_eq!(sql_literal(&Value::Blob(vec![0xDE, 0xAD])), "X'DEAD'");
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("plain"), "\"plain\"");
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }
}
