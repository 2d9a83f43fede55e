//! Mock database client for testing.
//!
//! Returns a scripted response and records how it was used, so tests can check
//! that a store was (or was not) contacted and that sessions were released.

use super::{ColumnInfo, DatabaseBackend, DatabaseClient, QueryResult, Value};
use crate::error::{BookscapeError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Shared usage counters for a mock client.
///
/// Clones share the same counters, so a test can keep a handle after the
/// client itself has been boxed and handed off.
#[derive(Debug, Clone, Default)]
pub struct MockStats {
    executions: Arc<AtomicUsize>,
    closes: Arc<AtomicUsize>,
    last_call: Arc<Mutex<Option<(String, Vec<String>)>>>,
}

impl MockStats {
    /// Number of `execute_query` calls.
    pub fn executions(&self) -> usize {
        self.executions.load(Ordering::SeqCst)
    }

    /// Number of `close` calls.
    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    /// SQL and parameters of the most recent execution.
    pub fn last_call(&self) -> Option<(String, Vec<String>)> {
        self.last_call
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
enum MockResponse {
    Echo,
    Rows(QueryResult),
    Fail(String),
}

/// A mock database client that returns predefined results.
#[derive(Debug)]
pub struct MockDatabaseClient {
    backend: DatabaseBackend,
    response: MockResponse,
    stats: MockStats,
}

impl MockDatabaseClient {
    /// Creates a mock that answers every query with one row echoing the SQL.
    pub fn new() -> Self {
        Self::with_response(MockResponse::Echo)
    }

    /// Creates a mock that answers every query with the given result.
    pub fn with_result(result: QueryResult) -> Self {
        Self::with_response(MockResponse::Rows(result))
    }

    /// Creates a mock whose queries all fail with the given engine message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_response(MockResponse::Fail(message.into()))
    }

    fn with_response(response: MockResponse) -> Self {
        Self {
            backend: DatabaseBackend::MySql,
            response,
            stats: MockStats::default(),
        }
    }

    /// Reports a different backend (affects dialect selection).
    pub fn on_backend(mut self, backend: DatabaseBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Returns a handle to this client's usage counters.
    pub fn stats(&self) -> MockStats {
        self.stats.clone()
    }
}

impl Default for MockDatabaseClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    fn backend(&self) -> DatabaseBackend {
        self.backend
    }

    async fn execute_query(&mut self, sql: &str, params: &[String]) -> Result<QueryResult> {
        self.stats.executions.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.stats.last_call.lock() {
            *last = Some((sql.to_string(), params.to_vec()));
        }

        match &self.response {
            MockResponse::Echo => Ok(QueryResult::with_data(
                vec![ColumnInfo::new("result", "text")],
                vec![vec![Value::String(format!("Mock result for: {}", sql))]],
            )
            .with_execution_time(Duration::from_millis(1))),
            MockResponse::Rows(result) => Ok(result.clone()),
            MockResponse::Fail(message) => Err(BookscapeError::query(message.clone())),
        }
    }

    async fn close(&mut self) -> Result<()> {
        self.stats.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
