//! MySQL database client implementation.
//!
//! Provides the `MySqlClient` struct that implements the `DatabaseClient` trait
//! over a single sqlx `MySqlConnection`.

use super::{
    is_transient_error, retry_delay, ColumnInfo, DatabaseBackend, DatabaseClient, QueryResult,
    Row, Value, MAX_RETRY_ATTEMPTS, QUERY_TIMEOUT_SECS,
};
use crate::config::{ConnectionConfig, DEFAULT_HOST, DEFAULT_USER};
use crate::error::{BookscapeError, Result};
use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlDatabaseError, MySqlRow};
use sqlx::{Column, Connection, Row as SqlxRow, TypeInfo, ValueRef};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// MySQL database session.
#[derive(Debug)]
pub struct MySqlClient {
    conn: Option<MySqlConnection>,
}

impl MySqlClient {
    /// Opens a session, retrying transient failures with exponential backoff.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let options = connect_options(config)?;

        let mut last_error = None;

        for attempt in 1..=MAX_RETRY_ATTEMPTS {
            debug!("Connection attempt {} of {}", attempt, MAX_RETRY_ATTEMPTS);

            match MySqlConnection::connect_with(&options).await {
                Ok(mut conn) => {
                    debug!("Successfully connected to MySQL");
                    apply_autocommit(&mut conn, config.autocommit).await?;
                    return Ok(Self { conn: Some(conn) });
                }
                Err(e) => {
                    let is_transient = is_transient_error(&e);
                    last_error = Some(e);

                    if attempt < MAX_RETRY_ATTEMPTS && is_transient {
                        let delay = retry_delay(attempt);
                        warn!(
                            "Connection attempt {} failed (transient error), retrying in {:?}",
                            attempt, delay
                        );
                        tokio::time::sleep(delay).await;
                    } else {
                        break;
                    }
                }
            }
        }

        Err(match last_error {
            Some(e) => map_connection_error(e, config),
            None => BookscapeError::connection("No connection attempt was made"),
        })
    }

    fn session(&mut self) -> Result<&mut MySqlConnection> {
        self.conn
            .as_mut()
            .ok_or_else(|| BookscapeError::connection("Session is already closed"))
    }
}

#[async_trait]
impl DatabaseClient for MySqlClient {
    fn backend(&self) -> DatabaseBackend {
        DatabaseBackend::MySql
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
            debug!("MySQL session closed");
        }
        Ok(())
    }
}

/// Builds sqlx connect options from our connection config.
fn connect_options(config: &ConnectionConfig) -> Result<MySqlConnectOptions> {
    let database = config.require_database()?;

    let mut options = MySqlConnectOptions::new()
        .host(config.host.as_deref().unwrap_or(DEFAULT_HOST))
        .port(config.port)
        .username(config.user.as_deref().unwrap_or(DEFAULT_USER))
        .database(database);

    if let Some(password) = &config.password {
        options = options.password(password);
    }

    Ok(options)
}

/// Sets the session autocommit mode.
async fn apply_autocommit(conn: &mut MySqlConnection, autocommit: bool) -> Result<()> {
    let statement = if autocommit {
        "SET autocommit = 1"
    } else {
        "SET autocommit = 0"
    };

    sqlx::query(statement)
        .execute(&mut *conn)
        .await
        .map_err(|e| BookscapeError::connection(format!("Failed to set autocommit: {e}")))?;

    Ok(())
}

/// Converts a sqlx MySqlRow to our Row type.
fn convert_row(row: &MySqlRow) -> Row {
    (0..row.len()).map(|i| convert_value(row, i)).collect()
}

/// Converts a single column value from a MySqlRow to our Value type.
fn convert_value(row: &MySqlRow, index: usize) -> Value {
    match row.try_get_raw(index) {
        Ok(raw) if raw.is_null() => return Value::Null,
        Ok(_) => {}
        Err(_) => return Value::Null,
    }

    let type_name = row.columns()[index].type_info().name().to_uppercase();

    let decoded = match type_name.as_str() {
        "BOOLEAN" => row.try_get::<bool, _>(index).ok().map(Value::Bool),

        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "YEAR" => {
            row.try_get::<i64, _>(index).ok().map(Value::Int)
        }

        name if name.ends_with("UNSIGNED") => row.try_get::<u64, _>(index).ok().map(|v| {
            i64::try_from(v)
                .map(Value::Int)
                .unwrap_or_else(|_| Value::String(v.to_string()))
        }),

        "FLOAT" => row
            .try_get::<f32, _>(index)
            .ok()
            .map(|v| Value::Float(v as f64)),

        "DOUBLE" => row.try_get::<f64, _>(index).ok().map(Value::Float),

        "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" => {
            row.try_get::<Vec<u8>, _>(index).ok().map(Value::Bytes)
        }

        _ => row.try_get::<String, _>(index).ok().map(Value::String),
    };

    // DECIMAL (what AVG returns) and anything else sqlx has no typed decode
    // for arrives as text on the wire.
    decoded
        .or_else(|| {
            row.try_get_unchecked::<String, _>(index)
                .ok()
                .map(Value::String)
        })
        .unwrap_or(Value::Null)
}

/// Maps sqlx connection errors to user-friendly messages.
fn map_connection_error(error: sqlx::Error, config: &ConnectionConfig) -> BookscapeError {
    let host = config.host.as_deref().unwrap_or(DEFAULT_HOST);
    let port = config.port;
    let user = config.user.as_deref().unwrap_or(DEFAULT_USER);
    let database = config.database.as_deref().unwrap_or("unknown");

    let error_str = error.to_string().to_lowercase();

    if error_str.contains("access denied") {
        BookscapeError::connection(format!(
            "Authentication failed for user '{user}'. Check your credentials."
        ))
    } else if error_str.contains("unknown database") {
        BookscapeError::connection(format!("Database '{database}' does not exist."))
    } else if error_str.contains("connection refused") || error_str.contains("could not connect")
    {
        BookscapeError::connection(format!(
            "Cannot connect to {host}:{port}. Check that the server is running."
        ))
    } else if error_str.contains("timed out") || error_str.contains("timeout") {
        BookscapeError::connection(format!(
            "Connection to {host}:{port} timed out. The server may be overloaded or unreachable."
        ))
    } else {
        BookscapeError::connection(error.to_string())
    }
}

/// Formats a query error with the MySQL error number and SQLSTATE if available.
fn format_query_error(error: sqlx::Error) -> String {
    let Some(db_error) = error.as_database_error() else {
        return error.to_string();
    };

    match db_error.try_downcast_ref::<MySqlDatabaseError>() {
        Some(mysql_error) => match mysql_error.code() {
            Some(state) => format!(
                "ERROR {} ({}): {}",
                mysql_error.number(),
                state,
                mysql_error.message()
            ),
            None => format!("ERROR {}: {}", mysql_error.number(), mysql_error.message()),
        },
        None => format!("ERROR: {}", db_error.message()),
    }
}
