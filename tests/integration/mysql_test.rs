//! MySQL integration tests.
//!
//! These need a server holding a populated `history_book` table; they are
//! skipped unless DATABASE_URL is set.

use bookscape::catalog::QueryCatalog;
use bookscape::config::ConnectionConfig;
use bookscape::db::{DatabaseBackend, DatabaseClient, MySqlClient};
use bookscape::error::BookscapeError;
use bookscape::query::{ExecutionResult, QueryExecutor};

/// Helper to get test database URL from environment.
fn get_test_database_url() -> Option<String> {
    std::env::var("DATABASE_URL").ok()
}

fn get_test_config() -> Option<ConnectionConfig> {
    let url = get_test_database_url()?;
    ConnectionConfig::from_connection_string(&url).ok()
}

/// Helper to create a test client.
async fn get_test_client() -> Option<MySqlClient> {
    MySqlClient::connect(&get_test_config()?).await.ok()
}

#[tokio::test]
async fn test_execute_simple_select() {
    let Some(mut client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let result = client
        .execute_query("SELECT 1 AS num, 'hello' AS greeting", &[])
        .await
        .unwrap();

    assert_eq!(client.backend(), DatabaseBackend::MySql);
    assert_eq!(result.columns[0].name, "num");
    assert_eq!(result.columns[1].name, "greeting");
    assert_eq!(result.row_count(), 1);

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_every_analytic_runs_on_mysql() {
    let Some(mut client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let catalog = QueryCatalog::load().unwrap();
    let mut executor = QueryExecutor::new(&mut client);

    for def in catalog.analytics() {
        let keyword = def.requires_param.then_some("History");
        let result = executor.execute_with_keyword(def, keyword).await;
        assert!(!result.is_failure(), "{}: {:?}", def.label, result.error());
    }

    drop(executor);
    client.close().await.unwrap();
}

#[tokio::test]
async fn test_unmatched_search_is_empty() {
    let Some(mut client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let catalog = QueryCatalog::load().unwrap();
    let result = QueryExecutor::new(&mut client)
        .execute_with_keyword(catalog.explore_search(), Some("Zzzzqqq"))
        .await;
    assert_eq!(result, ExecutionResult::Empty);

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_unknown_database_is_connection_error() {
    let Some(mut config) = get_test_config() else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    config.database = Some("bookscape_missing_database".to_string());

    let err = MySqlClient::connect(&config).await.unwrap_err();
    assert!(matches!(err, BookscapeError::Connection(_)));
}
