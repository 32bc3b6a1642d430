// atelier: Desktop Project Manager
//
// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! `sql` command implementation.
//!
//! ```text
//! --editor            spawn the configured database editor
//! --query SQL         SELECT, printed as text table or --json
//! --script FILE       execute_batch a script file
//! --tables            list user tables
//! --columns TABLE     pragma_table_info listing
//! --export            SQL dump of schema and data
//! ```

use std::path::PathBuf;

use rusqlite::types::Value;

use crate::cli::sql::SqlArgs;
use crate::config::Config;
use crate::core::process::builder::{ProcessBuilder, ProcessFlags};
use crate::dao::{Dao, QueryOutput, SqlScript};
use crate::error::{Result, bail_out};

/// Main handler for the `sql` command.
///
/// # Errors
///
/// Returns an error if no database path is configured or given, if the
/// requested Dao operation fails under the configured policy, or if the
/// editor process cannot be spawned.
pub async fn run_sql_command(args: &SqlArgs, config: &Config, dry: bool) -> Result<()> {
    let db_path = resolve_database_path(args, config)?;

    if args.editor {
        return launch_editor(&db_path, config, dry).await;
    }

    let dao = Dao::open(&db_path, config.database.dao_settings())?;

    if let Some(sql) = &args.query {
        let output = dao.query(sql, [])?;
        print_query_output(&output, args.json)?;
    } else if let Some(script) = &args.script {
        if dao.exec_script(&SqlScript::file(script))? {
            println!("script executed: {}", script.display());
        } else {
            println!("script failed: {}", script.display());
        }
    } else if args.tables {
        for table in dao.get_table_list()? {
            println!("{table}");
        }
    } else if let Some(table) = &args.columns {
        print_columns(&dao, table, args.json)?;
    } else if args.export {
        print!("{}", dao.export()?);
    } else {
        return Err(bail_out(
            "no action specified; use --query, --script, --tables, --columns, --export or --editor",
        )
        .into());
    }

    dao.close()
}

/// Picks the database path: CLI override first, then the `[database]` section.
fn resolve_database_path(args: &SqlArgs, config: &Config) -> Result<PathBuf> {
    args.database
        .clone()
        .or_else(|| config.database.path.clone())
        .ok_or_else(|| {
            bail_out("no database configured; set [database] path or pass a DATABASE argument")
                .into()
        })
}

/// Spawns the configured external database editor on the database file.
async fn launch_editor(db_path: &std::path::Path, config: &Config, dry: bool) -> Result<()> {
    if config.database.editor.is_empty() {
        return Err(bail_out("no editor configured; set [database] editor").into());
    }

    let builder = ProcessBuilder::new(&config.database.editor)
        .args(&config.database.editor_args)
        .arg(db_path)
        .name("editor")
        .inherit_stdio()
        // The editor's exit status is informational.
        .flag(ProcessFlags::ALLOW_FAILURE);

    if dry {
        println!("{}", builder.command_line());
        return Ok(());
    }

    let output = builder.run().await?;
    if !output.success() {
        println!("editor exited with code {}", output.exit_code());
    }
    Ok(())
}

/// Prints a query result as JSON or as a plain text table.
fn print_query_output(output: &QueryOutput, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&output.to_json())?);
        return Ok(());
    }
    if output.columns.is_empty() {
        return Ok(());
    }
    println!("{}", output.columns.join(" | "));
    for row in &output.rows {
        let cells: Vec<String> = row.iter().map(format_value).collect();
        println!("{}", cells.join(" | "));
    }
    Ok(())
}

/// Prints the column listing of a table.
fn print_columns(dao: &Dao, table: &str, json: bool) -> Result<()> {
    let columns = dao.get_column_list(table)?;
    if json {
        let rows: Vec<serde_json::Value> = columns
            .iter()
            .map(|c| {
                serde_json::json!({
                    "cid": c.cid,
                    "name": c.name,
                    "type": c.ty,
                    "not_null": c.not_null,
                    "default_value": c.default_value,
                    "primary_key": c.primary_key,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    for c in &columns {
        let mut line = format!("{} {} {}", c.cid, c.name, c.ty);
        if c.not_null {
            line.push_str(" NOT NULL");
        }
        if let Some(default) = &c.default_value {
            line.push_str(&format!(" DEFAULT {default}"));
        }
        if c.primary_key {
            line.push_str(" PRIMARY KEY");
        }
        println!("{line}");
    }
    Ok(())
}

/// Renders a SQL value for the plain text table.
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(r) => r.to_string(),
        Value::Text(t) => t.clone(),
        Value::Blob(b) => format!("<blob {} bytes>", b.len()),
    }
}
