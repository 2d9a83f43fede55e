//! Opens one database session per interaction.

use async_trait::async_trait;
use tracing::debug;

use crate::config::ConnectionConfig;
use crate::db::{self, DatabaseClient};
use crate::error::Result;

/// Source of fresh database sessions.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Opens a new session. Failures are descriptive `Connection` errors.
    async fn acquire(&self) -> Result<Box<dyn DatabaseClient>>;

    /// Human-readable description of the target, without credentials.
    fn describe(&self) -> String;
}

/// Provider backed by a resolved connection configuration.
#[derive(Debug, Clone)]
pub struct ConnectionProvider {
    config: ConnectionConfig,
}

impl ConnectionProvider {
    /// Creates a provider for the given configuration.
    pub fn new(config: ConnectionConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration sessions are opened with.
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }
}

#[async_trait]
impl SessionProvider for ConnectionProvider {
    async fn acquire(&self) -> Result<Box<dyn DatabaseClient>> {
        debug!("Opening session to {}", self.config.display_string());
        db::connect(&self.config).await
    }

    fn describe(&self) -> String {
        self.config.display_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BookscapeError;

    #[tokio::test]
    async fn test_missing_sqlite_file_fails_to_acquire() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.db");
        let provider = ConnectionProvider::new(ConnectionConfig::sqlite(path.to_string_lossy()));

        let err = provider.acquire().await.err().unwrap();
        assert!(matches!(err, BookscapeError::Connection(_)));
    }

    #[test]
    fn test_describe_hides_password() {
        let config = ConnectionConfig {
            password: Some("hunter2".to_string()),
            ..ConnectionConfig::default()
        };
        let provider = ConnectionProvider::new(config);

        assert!(!provider.describe().contains("hunter2"));
        assert_eq!(provider.config().port, 3306);
    }
}
