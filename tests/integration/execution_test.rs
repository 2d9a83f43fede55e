//! Executor tests against a seeded SQLite session.

use super::common::{Fixture, BOOKS};
use bookscape::catalog::QueryCatalog;
use bookscape::db::{connect, Value};
use bookscape::error::BookscapeError;
use bookscape::query::{ExecutionResult, QueryExecutor};
use pretty_assertions::assert_eq;

fn column<'a>(result: &'a ExecutionResult, name: &str) -> Vec<&'a Value> {
    let table = result.table().unwrap();
    let index = table.columns.iter().position(|c| c == name).unwrap();
    table.rows.iter().map(|row| &row[index]).collect()
}

#[tokio::test]
async fn test_keyword_search_returns_only_matching_rows() {
    let fixture = Fixture::seeded().await;
    let catalog = QueryCatalog::load().unwrap();
    let mut session = connect(&fixture.config()).await.unwrap();

    let result = QueryExecutor::new(session.as_mut())
        .execute_with_keyword(catalog.explore_search(), Some("War"))
        .await;

    let table = result.table().unwrap();
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.columns.len(), 12);
    let mut titles: Vec<String> = column(&result, "book_title")
        .into_iter()
        .map(Value::to_display_string)
        .collect();
    titles.sort();
    assert_eq!(titles, vec!["The Art of War".to_string(), "War and Peace".to_string()]);

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_unmatched_keyword_is_empty() {
    let fixture = Fixture::seeded().await;
    let catalog = QueryCatalog::load().unwrap();
    let mut session = connect(&fixture.config()).await.unwrap();

    let result = QueryExecutor::new(session.as_mut())
        .execute_with_keyword(catalog.explore_search(), Some("Zzzzqqq"))
        .await;
    assert_eq!(result, ExecutionResult::Empty);

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_ebook_availability_counts() {
    let fixture = Fixture::seeded().await;
    let catalog = QueryCatalog::load().unwrap();
    let mut session = connect(&fixture.config()).await.unwrap();

    let result = QueryExecutor::new(session.as_mut())
        .execute(
            catalog
                .lookup("1. Check Availability of eBooks vs Physical Books")
                .unwrap(),
            &[],
        )
        .await;

    let ebooks = BOOKS.iter().filter(|b| b.11 == 1).count() as i64;
    let physical = BOOKS.len() as i64 - ebooks;

    let mut rows = result.table().unwrap().rows.clone();
    rows.sort_by_key(|row| row[0].to_display_string());
    assert_eq!(
        rows,
        vec![
            vec![Value::Int(0), Value::Int(physical)],
            vec![Value::Int(1), Value::Int(ebooks)],
        ]
    );

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_rating_outliers_use_engine_statistics() {
    let fixture = Fixture::seeded().await;
    let catalog = QueryCatalog::load().unwrap();
    let mut session = connect(&fixture.config()).await.unwrap();

    let result = QueryExecutor::new(session.as_mut())
        .execute(catalog.lookup_number(19).unwrap(), &[])
        .await;

    assert_eq!(
        column(&result, "book_title"),
        vec![&Value::String("A Forgettable Chronicle".to_string())]
    );

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_every_analytic_runs() {
    let fixture = Fixture::seeded().await;
    let catalog = QueryCatalog::load().unwrap();
    let mut session = connect(&fixture.config()).await.unwrap();
    let mut executor = QueryExecutor::new(session.as_mut());

    for def in catalog.analytics() {
        let keyword = def.requires_param.then_some("War");
        let result = executor.execute_with_keyword(def, keyword).await;
        assert!(!result.is_failure(), "{}: {:?}", def.label, result.error());
    }

    drop(executor);
    session.close().await.unwrap();
}

#[tokio::test]
async fn test_expected_analytic_shapes() {
    let fixture = Fixture::seeded().await;
    let catalog = QueryCatalog::load().unwrap();
    let mut session = connect(&fixture.config()).await.unwrap();
    let mut executor = QueryExecutor::new(session.as_mut());

    let most_books = executor.execute(catalog.lookup_number(2).unwrap(), &[]).await;
    assert_eq!(
        most_books.table().unwrap().rows,
        vec![vec![Value::String("Penguin".to_string()), Value::Int(2)]]
    );

    let discounted = executor.execute(catalog.lookup_number(6).unwrap(), &[]).await;
    assert_eq!(discounted.table().unwrap().row_count(), 3);

    let many_authors = executor.execute(catalog.lookup_number(11).unwrap(), &[]).await;
    assert_eq!(
        column(&many_authors, "book_title"),
        vec![&Value::String("A Forgettable Chronicle".to_string())]
    );

    let big_publishers = executor.execute(catalog.lookup_number(9).unwrap(), &[]).await;
    assert_eq!(big_publishers, ExecutionResult::Empty);

    let titled = executor
        .execute_with_keyword(catalog.lookup_number(14).unwrap(), Some("War"))
        .await;
    assert_eq!(titled.table().unwrap().columns, vec!["book_title".to_string()]);
    assert_eq!(titled.table().unwrap().row_count(), 2);

    drop(executor);
    session.close().await.unwrap();
}

#[tokio::test]
async fn test_arity_mismatch_against_real_session() {
    let fixture = Fixture::seeded().await;
    let catalog = QueryCatalog::load().unwrap();
    let mut session = connect(&fixture.config()).await.unwrap();

    let result = QueryExecutor::new(session.as_mut())
        .execute(catalog.lookup_number(14).unwrap(), &[])
        .await;
    assert!(matches!(
        result,
        ExecutionResult::Failure(BookscapeError::InvalidArgument(_))
    ));

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_like_wildcards_pass_through() {
    let fixture = Fixture::seeded().await;
    let catalog = QueryCatalog::load().unwrap();
    let mut session = connect(&fixture.config()).await.unwrap();

    // "_" matches any single character
    let result = QueryExecutor::new(session.as_mut())
        .execute_with_keyword(catalog.explore_search(), Some("S_QR"))
        .await;
    assert_eq!(result.table().unwrap().row_count(), 1);

    session.close().await.unwrap();
}
