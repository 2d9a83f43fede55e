//! Shared fixtures: a seeded `history_book` SQLite database and a provider
//! that records session releases.

use async_trait::async_trait;
use bookscape::app::Dashboard;
use bookscape::catalog::QueryCatalog;
use bookscape::config::ConnectionConfig;
use bookscape::connection::{ConnectionProvider, SessionProvider};
use bookscape::db::{DatabaseBackend, DatabaseClient, QueryResult};
use bookscape::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

const SCHEMA: &str = "CREATE TABLE history_book (
    book_id TEXT PRIMARY KEY,
    book_title TEXT,
    book_authors TEXT,
    publisher TEXT,
    category TEXT,
    pagecount INTEGER,
    amount_listPrice REAL,
    amount_retailPrice REAL,
    averagerating REAL,
    ratings_count INTEGER,
    year INTEGER,
    isEbook INTEGER
)";

/// (id, title, authors, publisher, category, pages, list, retail, rating, ratings, year, ebook)
type BookRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    i64,
    f64,
    f64,
    f64,
    i64,
    i64,
    i64,
);

/// Six books: two titles contain "War", two are eBooks, one rating is an outlier.
#[rustfmt::skip]
pub const BOOKS: &[BookRow] = &[
    ("b1", "War and Peace", "Leo Tolstoy", "Penguin", "History", 1225, 20.0, 15.0, 4.0, 900, 2008, 0),
    ("b2", "The Art of War", "Sun Tzu", "Penguin", "Military", 96, 10.0, 7.0, 4.1, 1500, 2012, 1),
    ("b3", "SPQR", "Mary Beard", "Profile", "History", 608, 25.0, 24.0, 3.9, 300, 2015, 0),
    ("b4", "The Silk Roads", "Peter Frankopan", "Bloomsbury", "History", 656, 30.0, 21.0, 4.0, 450, 2015, 1),
    ("b5", "Guns, Germs, and Steel", "Jared Diamond", "Norton", "History", 480, 18.0, 17.0, 4.2, 2200, 1997, 0),
    ("b6", "A Forgettable Chronicle", "Anon, Scribe One, Scribe Two, Scribe Three", "Vanity", "History", 120, 9.0, 9.0, 1.0, 3, 2011, 0),
];

/// A seeded database file that lives as long as this value.
pub struct Fixture {
    _dir: TempDir,
    pub path: PathBuf,
}

impl Fixture {
    /// Creates and seeds a fresh fixture database.
    pub async fn seeded() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.db");

        let mut conn = writable(&path).await;
        sqlx::query(SCHEMA).execute(&mut conn).await.unwrap();
        for book in BOOKS {
            sqlx::query("INSERT INTO history_book VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)")
                .bind(book.0)
                .bind(book.1)
                .bind(book.2)
                .bind(book.3)
                .bind(book.4)
                .bind(book.5)
                .bind(book.6)
                .bind(book.7)
                .bind(book.8)
                .bind(book.9)
                .bind(book.10)
                .bind(book.11)
                .execute(&mut conn)
                .await
                .unwrap();
        }
        conn.close().await.unwrap();

        Self { _dir: dir, path }
    }

    /// Runs a statement against the fixture outside of any BookScape session.
    pub async fn execute(&self, sql: &str) {
        let mut conn = writable(&self.path).await;
        sqlx::query(sql).execute(&mut conn).await.unwrap();
        conn.close().await.unwrap();
    }

    pub fn config(&self) -> ConnectionConfig {
        ConnectionConfig::sqlite(self.path.to_string_lossy())
    }

    /// A dashboard over this fixture, plus its release counters.
    pub fn dashboard(&self) -> (Dashboard, SessionCounters) {
        let provider = TrackingProvider::new(ConnectionProvider::new(self.config()));
        let counters = provider.counters.clone();
        let dashboard = Dashboard::new(QueryCatalog::load().unwrap(), Box::new(provider));
        (dashboard, counters)
    }
}

async fn writable(path: &std::path::Path) -> SqliteConnection {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    SqliteConnection::connect_with(&options).await.unwrap()
}

/// Counts acquired and released sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionCounters {
    acquired: Arc<AtomicUsize>,
    released: Arc<AtomicUsize>,
}

impl SessionCounters {
    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

/// Wraps a real provider so tests can see when sessions are closed.
pub struct TrackingProvider {
    inner: ConnectionProvider,
    counters: SessionCounters,
}

impl TrackingProvider {
    pub fn new(inner: ConnectionProvider) -> Self {
        Self {
            inner,
            counters: SessionCounters::default(),
        }
    }
}

#[async_trait]
impl SessionProvider for TrackingProvider {
    async fn acquire(&self) -> Result<Box<dyn DatabaseClient>> {
        let session = self.inner.acquire().await?;
        self.counters.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(TrackedSession {
            inner: session,
            released: self.counters.released.clone(),
        }))
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }
}

struct TrackedSession {
    inner: Box<dyn DatabaseClient>,
    released: Arc<AtomicUsize>,
}

#[async_trait]
impl DatabaseClient for TrackedSession {
    fn backend(&self) -> DatabaseBackend {
        self.inner.backend()
    }

    async fn execute_query(&mut self, sql: &str, params: &[String]) -> Result<QueryResult> {
        self.inner.execute_query(sql, params).await
    }

    async fn close(&mut self) -> Result<()> {
        self.released.fetch_add(1, Ordering::SeqCst);
        self.inner.close().await
    }
}
