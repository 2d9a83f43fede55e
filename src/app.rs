//! Core dashboard for BookScape.
//!
//! One call per user action: acquire a session, run one catalog definition,
//! release the session, hand back a tagged outcome. Both the terminal UI and
//! the one-shot command line drive this type.

use tracing::{debug, warn};

use crate::catalog::{QueryCatalog, QueryDefinition};
use crate::connection::SessionProvider;
use crate::query::{keyword_params, ExecutionResult, QueryExecutor};

/// Navigation modes offered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Welcome page.
    #[default]
    Home,
    /// Free keyword search over titles.
    Explore,
    /// The numbered analytics.
    Analytics,
}

impl Mode {
    /// All modes in navigation order.
    pub const ALL: [Mode; 3] = [Mode::Home, Mode::Explore, Mode::Analytics];

    /// Label shown in navigation.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Explore => "Explore Books",
            Self::Analytics => "Analytics",
        }
    }
}

/// The interaction layer over a catalog and a session provider.
pub struct Dashboard {
    catalog: QueryCatalog,
    provider: Box<dyn SessionProvider>,
}

impl Dashboard {
    /// Creates a dashboard.
    pub fn new(catalog: QueryCatalog, provider: Box<dyn SessionProvider>) -> Self {
        Self { catalog, provider }
    }

    /// The loaded query catalog.
    pub fn catalog(&self) -> &QueryCatalog {
        &self.catalog
    }

    /// Display string of the connection target.
    pub fn connection_info(&self) -> String {
        self.provider.describe()
    }

    /// Runs the explore-mode title search.
    pub async fn explore(&self, keyword: &str) -> ExecutionResult {
        let definition = *self.catalog.explore_search();
        self.run(&definition, Some(keyword)).await
    }

    /// Runs an analytic by its 1-based number.
    pub async fn run_analytic(&self, number: usize, keyword: Option<&str>) -> ExecutionResult {
        let definition = match self.catalog.lookup_number(number) {
            Ok(definition) => *definition,
            Err(e) => return ExecutionResult::Failure(e),
        };
        self.run(&definition, keyword).await
    }

    /// Runs an analytic by its exact label.
    pub async fn run_labelled(&self, label: &str, keyword: Option<&str>) -> ExecutionResult {
        let definition = match self.catalog.lookup(label) {
            Ok(definition) => *definition,
            Err(e) => return ExecutionResult::Failure(e),
        };
        self.run(&definition, keyword).await
    }

    /// Runs one definition in its own session.
    ///
    /// The session is closed on every path once acquired. A connection
    /// failure short-circuits before anything is executed.
    pub async fn run(
        &self,
        definition: &QueryDefinition,
        keyword: Option<&str>,
    ) -> ExecutionResult {
        let params = keyword_params(keyword);

        let mut session = match self.provider.acquire().await {
            Ok(session) => session,
            Err(e) => {
                warn!("Could not open session for {}: {}", definition.label, e);
                return ExecutionResult::Failure(e);
            }
        };

        let outcome = QueryExecutor::new(session.as_mut())
            .execute(definition, &params)
            .await;

        if let Err(e) = session.close().await {
            warn!("Failed to release session: {}", e);
        } else {
            debug!("Released session after {}", definition.label);
        }

        outcome
    }
}
