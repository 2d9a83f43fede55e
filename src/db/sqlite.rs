//! SQLite database client implementation.
//!
//! Opens a local database file read-only over a single sqlx `SqliteConnection`.
//! Used for offline browsing of an exported catalog and for test fixtures.

use super::{
    ColumnInfo, DatabaseBackend, DatabaseClient, QueryResult, Row, Value, QUERY_TIMEOUT_SECS,
};
use crate::config::ConnectionConfig;
use crate::error::{BookscapeError, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Column, Connection, Row as SqlxRow, TypeInfo, ValueRef};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::debug;

/// SQLite database session.
#[derive(Debug)]
pub struct SqliteClient {
    conn: Option<SqliteConnection>,
}

impl SqliteClient {
    /// Opens the configured database file read-only.
    ///
    /// The file must already exist; a missing file is a connection error rather
    /// than an empty new database.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let path = config.require_database()?;

        if !Path::new(path).is_file() {
            return Err(BookscapeError::connection(format!(
                "Database file '{path}' does not exist."
            )));
        }

        if !config.autocommit {
            debug!("SQLite sessions always autocommit; ignoring autocommit = false");
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);

        let conn = SqliteConnection::connect_with(&options)
            .await
            .map_err(|e| BookscapeError::connection(format!("Cannot open '{path}': {e}")))?;

        debug!("Opened SQLite database {}", path);
        Ok(Self { conn: Some(conn) })
    }

    fn session(&mut self) -> Result<&mut SqliteConnection> {
        self.conn
            .as_mut()
            .ok_or_else(|| BookscapeError::connection("Session is already closed"))
    }
}

#[async_trait]
impl DatabaseClient for SqliteClient {
    fn backend(&self) -> DatabaseBackend {
        DatabaseBackend::Sqlite
    }

    async fn execute_query(&mut self, sql: &str, params: &[String]) -> Result<QueryResult> {
        let conn = self.session()?;
        let start = Instant::now();

        let mut query = sqlx::query(sql);
        for param in params {
            query = query.bind(param.as_str());
        }

        let result = tokio::time::timeout(
            Duration::from_secs(QUERY_TIMEOUT_SECS),
            query.fetch_all(&mut *conn),
        )
        .await
        .map_err(|_| {
            BookscapeError::query(format!(
                "Query timed out after {QUERY_TIMEOUT_SECS} seconds"
            ))
        })?
        .map_err(|e| BookscapeError::query(format_query_error(e)))?;

        let execution_time = start.elapsed();

        let columns: Vec<ColumnInfo> = result
            .first()
            .map(|first_row| {
                first_row
                    .columns()
                    .iter()
                    .map(|col| ColumnInfo::new(col.name(), col.type_info().name()))
                    .collect()
            })
            .unwrap_or_default();

        let rows: Vec<Row> = result.iter().map(convert_row).collect();

        Ok(QueryResult::with_data(columns, rows).with_execution_time(execution_time))
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            conn.close()
                .await
                .map_err(|e| BookscapeError::connection(format!("Failed to close session: {e}")))?;
            debug!("SQLite session closed");
        }
        Ok(())
    }
}

/// Converts a sqlx SqliteRow to our Row type.
fn convert_row(row: &SqliteRow) -> Row {
    (0..row.len()).map(|i| convert_value(row, i)).collect()
}

/// Converts a single column value from a SqliteRow to our Value type.
///
/// SQLite is dynamically typed, so decodes are attempted in order of
/// specificity instead of trusting the declared column type.
fn convert_value(row: &SqliteRow, index: usize) -> Value {
    match row.try_get_raw(index) {
        Ok(raw) if raw.is_null() => return Value::Null,
        Ok(_) => {}
        Err(_) => return Value::Null,
    }

    if let Ok(v) = row.try_get::<i64, _>(index) {
        return Value::Int(v);
    }
    if let Ok(v) = row.try_get::<f64, _>(index) {
        return Value::Float(v);
    }
    if let Ok(v) = row.try_get::<String, _>(index) {
        return Value::String(v);
    }
    if let Ok(v) = row.try_get::<Vec<u8>, _>(index) {
        return Value::Bytes(v);
    }
    if let Ok(v) = row.try_get::<bool, _>(index) {
        return Value::Bool(v);
    }
    Value::Null
}

/// Formats a query error, keeping the engine message.
fn format_query_error(error: sqlx::Error) -> String {
    match error.as_database_error() {
        Some(db_error) => format!("ERROR: {}", db_error.message()),
        None => error.to_string(),
    }
}
