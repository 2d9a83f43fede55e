//! Dashboard tests: one session per interaction, always released.

use super::common::Fixture;
use bookscape::app::Dashboard;
use bookscape::catalog::QueryCatalog;
use bookscape::cli::OutputFormat;
use bookscape::config::ConnectionConfig;
use bookscape::connection::ConnectionProvider;
use bookscape::error::BookscapeError;
use bookscape::output::{format_outcome, format_text};
use bookscape::query::ExecutionResult;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_explore_releases_session() {
    let fixture = Fixture::seeded().await;
    let (dashboard, counters) = fixture.dashboard();

    let result = dashboard.explore("War").await;

    assert_eq!(result.table().unwrap().row_count(), 2);
    assert_eq!(counters.acquired(), 1);
    assert_eq!(counters.released(), 1);
}

#[tokio::test]
async fn test_dropped_table_is_query_failure_and_releases() {
    let fixture = Fixture::seeded().await;
    fixture.execute("DROP TABLE history_book").await;
    let (dashboard, counters) = fixture.dashboard();

    let result = dashboard.run_analytic(1, None).await;

    let error = result.error().unwrap();
    assert!(matches!(error, BookscapeError::Query(_)));
    assert!(error.message().contains("no such table"));
    assert_eq!(counters.released(), 1);
}

#[tokio::test]
async fn test_ui_stays_usable_after_failure() {
    let fixture = Fixture::seeded().await;
    let (dashboard, counters) = fixture.dashboard();

    let failed = dashboard.run_analytic(14, Some("")).await;
    assert!(matches!(
        failed,
        ExecutionResult::Failure(BookscapeError::InvalidArgument(_))
    ));

    let recovered = dashboard.run_analytic(14, Some("War")).await;
    assert_eq!(recovered.table().unwrap().row_count(), 2);
    assert_eq!(counters.acquired(), 2);
    assert_eq!(counters.released(), 2);
}

#[tokio::test]
async fn test_repeat_runs_are_identical() {
    let fixture = Fixture::seeded().await;
    let (dashboard, _) = fixture.dashboard();

    for number in [1, 7, 10, 12] {
        let first = dashboard.run_analytic(number, None).await;
        let second = dashboard.run_analytic(number, None).await;
        assert_eq!(first, second);
        assert!(first.table().is_some());
    }
}

#[tokio::test]
async fn test_missing_database_file_short_circuits() {
    let dir = tempfile::tempdir().unwrap();
    let config = ConnectionConfig::sqlite(dir.path().join("nowhere.db").to_string_lossy());
    let dashboard = Dashboard::new(
        QueryCatalog::load().unwrap(),
        Box::new(ConnectionProvider::new(config)),
    );

    let result = dashboard.explore("War").await;

    let error = result.error().unwrap();
    assert_eq!(error.category(), "Connection Error");
    assert!(error.message().contains("does not exist"));
}

#[tokio::test]
async fn test_one_shot_text_output() {
    let fixture = Fixture::seeded().await;
    let (dashboard, _) = fixture.dashboard();

    let result = dashboard.run_analytic(2, None).await;
    let text = format_outcome(
        "2. Find the Publisher with the Most Books Published",
        &result,
        OutputFormat::Text,
    )
    .unwrap();

    assert_eq!(
        text,
        "\
┌───────────┬────────────┐
│ publisher │ book_count │
├───────────┼────────────┤
│ Penguin   │ 2          │
└───────────┴────────────┘
1 row returned"
    );

    let empty = dashboard.explore("Zzzzqqq").await;
    assert_eq!(format_text(&empty), "No results found for this query.");
}
