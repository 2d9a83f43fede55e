//! Database abstraction layer for BookScape.
//!
//! Provides a trait-based interface over a single database session, allowing
//! different database backends to be used interchangeably.

mod mock;
mod mysql;
mod sqlite;
mod types;

pub use mock::{MockDatabaseClient, MockStats};
pub use mysql::MySqlClient;
pub use sqlite::SqliteClient;
pub use types::{ColumnInfo, QueryResult, Row, Value};

use crate::config::ConnectionConfig;
use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Query timeout in seconds.
pub(crate) const QUERY_TIMEOUT_SECS: u64 = 30;

/// Maximum number of connection retry attempts.
pub(crate) const MAX_RETRY_ATTEMPTS: u32 = 3;

/// Base delay between retry attempts (doubles each retry).
pub(crate) const RETRY_BASE_DELAY_MS: u64 = 500;

/// Supported database backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    #[default]
    MySql,
    Sqlite,
}

impl DatabaseBackend {
    /// Returns the backend as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::Sqlite => "sqlite",
        }
    }

    /// Parses a backend from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mysql" | "mariadb" => Some(Self::MySql),
            "sqlite" | "sqlite3" => Some(Self::Sqlite),
            _ => None,
        }
    }

    /// Returns the default port for this backend (0 when the backend has none).
    pub fn default_port(&self) -> u16 {
        match self {
            Self::MySql => 3306,
            Self::Sqlite => 0,
        }
    }
}

/// Opens a database session for the given configuration.
///
/// This is the central factory function for database connections.
pub async fn connect(config: &ConnectionConfig) -> Result<Box<dyn DatabaseClient>> {
    match config.backend {
        DatabaseBackend::MySql => {
            let client = MySqlClient::connect(config).await?;
            Ok(Box::new(client))
        }
        DatabaseBackend::Sqlite => {
            let client = SqliteClient::connect(config).await?;
            Ok(Box::new(client))
        }
    }
}

/// Trait defining the interface for a single database session.
///
/// All database operations are async and return Results with BookscapeError.
#[async_trait]
pub trait DatabaseClient: Send {
    /// Returns the backend this session talks to.
    fn backend(&self) -> DatabaseBackend;

    /// Executes a SQL query with positional parameters bound by the driver
    /// and returns every row.
    async fn execute_query(&mut self, sql: &str, params: &[String]) -> Result<QueryResult>;

    /// Closes the session. Closing twice is a no-op.
    async fn close(&mut self) -> Result<()>;
}

/// Returns the exponential backoff delay for a retry attempt (1-based).
pub(crate) fn retry_delay(attempt: u32) -> Duration {
    Duration::from_millis(RETRY_BASE_DELAY_MS * 2u64.pow(attempt.saturating_sub(1)))
}

/// Determines if a connection error is transient and worth retrying.
pub(crate) fn is_transient_error(error: &sqlx::Error) -> bool {
    if matches!(error, sqlx::Error::PoolTimedOut | sqlx::Error::Io(_)) {
        return true;
    }

    let error_str = error.to_string().to_lowercase();

    if error_str.contains("access denied")
        || error_str.contains("authentication failed")
        || error_str.contains("unknown database")
        || error_str.contains("ssl")
        || error_str.contains("tls")
    {
        return false;
    }

    error_str.contains("connection refused")
        || error_str.contains("timed out")
        || error_str.contains("timeout")
        || error_str.contains("temporarily unavailable")
        || error_str.contains("connection reset")
        || error_str.contains("broken pipe")
}
