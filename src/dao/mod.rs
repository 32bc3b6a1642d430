// atelier: Desktop Project Manager
//
// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! SQLite data-access helper.
//!
//! ```text
//! Dao::open(path, settings)
//!   parent dirs --> is_new? --> Connection::open --> creation script (once)
//!
//! edit / query / exec_script / get_table_list / get_column_list / export
//!   engine errors  --> raise_exception policy
//!   wrong-shape statements (warning class) --> raise_warning policy
//!   swallowed --> tracing::warn + false / empty result
//!
//! close(self) explicit, or released on drop (scoped acquisition)
//! ```

mod export;

use std::path::{Path, PathBuf};

use bon::Builder;
use rusqlite::Connection;
use rusqlite::types::Value;
use tracing::{debug, warn};

use crate::error::{DaoError, Result};

/// A SQL script supplied either inline or as a file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlScript {
    /// Inline SQL text.
    Text(String),
    /// Path to a file containing SQL text.
    File(PathBuf),
}

impl SqlScript {
    /// Inline script.
    pub fn text(sql: impl Into<String>) -> Self {
        Self::Text(sql.into())
    }

    /// Script loaded from a file when executed.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Returns the SQL text, reading the file variant from disk.
    ///
    /// # Errors
    ///
    /// Returns a [`DaoError::Script`] if the file cannot be read.
    pub fn load(&self) -> std::result::Result<String, DaoError> {
        match self {
            Self::Text(sql) => Ok(sql.clone()),
            Self::File(path) => std::fs::read_to_string(path).map_err(|source| DaoError::Script {
                path: path.clone(),
                source,
            }),
        }
    }
}

/// Dao construction settings.
///
/// Both policy flags default to raising: errors and warning-class
/// conditions surface as `Err`. Clearing a flag swallows that class
/// instead, reporting it through a log line and a `false`/empty return.
#[derive(Debug, Clone, Builder)]
pub struct DaoSettings {
    #[builder(setters(name = with_creation_script))]
    creation_script: Option<SqlScript>,
    #[builder(setters(name = with_raise_exception), default = true)]
    raise_exception: bool,
    #[builder(setters(name = with_raise_warning), default = true)]
    raise_warning: bool,
}

impl Default for DaoSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl DaoSettings {
    /// The script run once when a database file is first created.
    #[must_use]
    pub const fn creation_script(&self) -> Option<&SqlScript> {
        self.creation_script.as_ref()
    }

    /// Whether engine errors are re-raised.
    #[must_use]
    pub const fn raise_exception(&self) -> bool {
        self.raise_exception
    }

    /// Whether warning-class conditions are re-raised.
    #[must_use]
    pub const fn raise_warning(&self) -> bool {
        self.raise_warning
    }
}

/// Result of a query: column names plus rows of SQL values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOutput {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl QueryOutput {
    /// Renders the output as a JSON array of objects.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row)
                    .map(|(col, val)| (col.clone(), value_to_json(val)))
                    .collect::<serde_json::Map<_, _>>()
                    .into()
            })
            .collect();
        serde_json::Value::Array(rows)
    }
}

/// Converts a SQL value to JSON. Blobs become arrays of bytes; a non-finite
/// real becomes null, matching `serde_json`'s own treatment.
fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Integer(i) => (*i).into(),
        Value::Real(r) => serde_json::Number::from_f64(*r)
            .map_or(serde_json::Value::Null, serde_json::Value::Number),
        Value::Text(t) => t.clone().into(),
        Value::Blob(b) => b.iter().map(|byte| u64::from(*byte)).collect(),
    }
}

/// One column from `pragma_table_info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub cid: i64,
    pub name: String,
    pub ty: String,
    pub not_null: bool,
    pub default_value: Option<String>,
    pub primary_key: bool,
}

/// Wrapper around a SQLite connection with consistent error policies.
///
/// The connection is released when the `Dao` is dropped; [`Dao::close`]
/// exists for callers that want close errors reported.
#[derive(Debug)]
pub struct Dao {
    conn: Connection,
    path: PathBuf,
    is_new: bool,
    settings: DaoSettings,
}

impl Dao {
    /// Opens (creating if necessary) the database at `path`.
    ///
    /// Parent directories are created. When the file did not exist yet,
    /// `is_new()` reports `true` and the creation script from the settings
    /// runs exactly once; reopening an existing file never re-runs it.
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created, the database
    /// cannot be opened, or the creation script fails. Creation-script
    /// failures are not subject to the policy flags: a half-created
    /// database is never handed out.
    pub fn open(path: impl AsRef<Path>, settings: DaoSettings) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let is_new = !path.exists();
        let conn = Connection::open(path).map_err(|source| DaoError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let dao = Self {
            conn,
            path: path.to_path_buf(),
            is_new,
            settings,
        };

        if is_new && let Some(script) = dao.settings.creation_script() {
            let sql = script.load()?;
            dao.conn.execute_batch(&sql).map_err(DaoError::Sql)?;
            debug!(path = %dao.path.display(), "creation script executed");
        }

        debug!(path = %dao.path.display(), is_new, "database opened");
        Ok(dao)
    }

    /// Opens an in-memory database. The creation script, if any, always
    /// runs since the database is necessarily new.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be opened or the creation
    /// script fails.
    pub fn open_in_memory(settings: DaoSettings) -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| DaoError::Open {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        let dao = Self {
            conn,
            path: PathBuf::from(":memory:"),
            is_new: true,
            settings,
        };

        if let Some(script) = dao.settings.creation_script() {
            let sql = script.load()?;
            dao.conn.execute_batch(&sql).map_err(DaoError::Sql)?;
        }

        Ok(dao)
    }

    /// Whether the database file was created by this open.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.is_new
    }

    /// Path of the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The settings this Dao was constructed with.
    #[must_use]
    pub const fn settings(&self) -> &DaoSettings {
        &self.settings
    }

    /// Executes one DML/DDL statement.
    ///
    /// Returns `true` on success. When the matching policy flag is
    /// cleared, engine failures return `false` instead of an error.
    ///
    /// # Errors
    ///
    /// Engine errors, per the policy flags.
    pub fn edit(&self, sql: &str, params: impl rusqlite::Params) -> Result<bool> {
        let outcome = self.conn.execute(sql, params).map(|_| true);
        self.absorb(outcome, false, "edit")
    }

    /// Runs a query and returns `(columns, rows)`.
    ///
    /// When a failure is swallowed by the policy flags the output is
    /// empty.
    ///
    /// # Errors
    ///
    /// Engine errors, per the policy flags.
    pub fn query(&self, sql: &str, params: impl rusqlite::Params) -> Result<QueryOutput> {
        let outcome = self.run_query(sql, params);
        self.absorb(outcome, QueryOutput::default(), "query")
    }

    fn run_query(&self, sql: &str, params: impl rusqlite::Params) -> rusqlite::Result<QueryOutput> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().iter().map(ToString::to_string).collect();
        let column_count = columns.len();

        let mut rows = stmt.query(params)?;
        let mut collected = Vec::new();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(column_count);
            for i in 0..column_count {
                values.push(row.get::<_, Value>(i)?);
            }
            collected.push(values);
        }

        Ok(QueryOutput {
            columns,
            rows: collected,
        })
    }

    /// Executes a multi-statement script.
    ///
    /// # Errors
    ///
    /// File-read errors are always raised; engine errors follow the
    /// policy flags.
    pub fn exec_script(&self, script: &SqlScript) -> Result<bool> {
        let sql = script.load()?;
        let outcome = self.conn.execute_batch(&sql).map(|()| true);
        self.absorb(outcome, false, "exec_script")
    }

    /// Lists user tables, sorted by name.
    ///
    /// # Errors
    ///
    /// Engine errors, per the policy flags.
    pub fn get_table_list(&self) -> Result<Vec<String>> {
        let outcome = (|| {
            let mut stmt = self.conn.prepare(
                "SELECT name FROM sqlite_master \
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
            )?;
            let names = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(names)
        })();
        self.absorb(outcome, Vec::new(), "get_table_list")
    }

    /// Lists the columns of `table`.
    ///
    /// # Errors
    ///
    /// Engine errors, per the policy flags. An unknown table yields an
    /// empty list, which is how `pragma_table_info` reports it.
    pub fn get_column_list(&self, table: &str) -> Result<Vec<ColumnInfo>> {
        let outcome = (|| {
            let mut stmt = self.conn.prepare(
                "SELECT cid, name, type, \"notnull\", dflt_value, pk \
                 FROM pragma_table_info(?1)",
            )?;
            let columns = stmt
                .query_map([table], |row| {
                    Ok(ColumnInfo {
                        cid: row.get(0)?,
                        name: row.get(1)?,
                        ty: row.get(2)?,
                        not_null: row.get::<_, i64>(3)? != 0,
                        default_value: row.get(4)?,
                        primary_key: row.get::<_, i64>(5)? != 0,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(columns)
        })();
        self.absorb(outcome, Vec::new(), "get_column_list")
    }

    /// Dumps the whole database as executable SQL (schema plus data).
    ///
    /// # Errors
    ///
    /// Engine errors, per the policy flags; a swallowed failure yields an
    /// empty string.
    pub fn export(&self) -> Result<String> {
        let outcome = export::dump(&self.conn);
        self.absorb(outcome, String::new(), "export")
    }

    /// Closes the connection, reporting any close-time error.
    ///
    /// Dropping the `Dao` releases the connection too; this exists for
    /// callers that want the error surfaced.
    ///
    /// # Errors
    ///
    /// Returns a [`DaoError::CloseFailed`] if sqlite rejects the close.
    pub fn close(self) -> Result<()> {
        let path = self.path;
        self.conn
            .close()
            .map_err(|(_, source)| DaoError::CloseFailed { path, source })?;
        Ok(())
    }

    /// Applies the raise-or-swallow policies to an engine outcome.
    fn absorb<T>(&self, outcome: rusqlite::Result<T>, fallback: T, op: &str) -> Result<T> {
        match outcome {
            Ok(value) => Ok(value),
            Err(e) if is_warning_class(&e) => {
                if self.settings.raise_warning() {
                    Err(DaoError::Sql(e).into())
                } else {
                    warn!(op, error = %e, "sql warning swallowed");
                    Ok(fallback)
                }
            }
            Err(e) => {
                if self.settings.raise_exception() {
                    Err(DaoError::Sql(e).into())
                } else {
                    warn!(op, error = %e, "sql error swallowed");
                    Ok(fallback)
                }
            }
        }
    }
}

/// Warning-class conditions: the statement has the wrong shape for the
/// call, but the SQL itself may be fine (the class the DB-API surfaces as
/// warnings rather than errors).
const fn is_warning_class(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::MultipleStatement | rusqlite::Error::ExecuteReturnedResults
    )
}
