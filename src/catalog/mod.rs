//! The query catalog.
//!
//! An ordered, immutable set of named query templates: the explore-mode title
//! search plus the twenty numbered analytics. The catalog is validated once
//! when loaded and never mutated afterwards.

mod definitions;
mod validate;

pub use definitions::QUERIES;
pub use validate::{count_placeholders, validate_definitions, validate_template};

use crate::db::DatabaseBackend;
use crate::error::{BookscapeError, Result};
use tracing::debug;

/// What a definition is offered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Free keyword search from the Explore Books view.
    Search,
    /// A numbered analytic from the Analytics view.
    Analytic(u8),
}

/// A named query template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryDefinition {
    /// Human-readable label, unique within the catalog.
    pub label: &'static str,
    /// SQL with `?` placeholders.
    pub template: &'static str,
    /// Replacement template for SQLite where the primary uses MySQL-only functions.
    pub sqlite_template: Option<&'static str>,
    /// Whether the template takes exactly one keyword parameter.
    pub requires_param: bool,
    /// How the definition is offered.
    pub kind: QueryKind,
}

impl QueryDefinition {
    /// Returns the SQL to run against the given backend.
    pub fn template_for(&self, backend: DatabaseBackend) -> &'static str {
        match (backend, self.sqlite_template) {
            (DatabaseBackend::Sqlite, Some(variant)) => variant,
            _ => self.template,
        }
    }

    /// Number of parameters the template binds.
    pub fn param_count(&self) -> usize {
        usize::from(self.requires_param)
    }

    /// Returns the analytic number, if this is an analytic.
    pub fn number(&self) -> Option<u8> {
        match self.kind {
            QueryKind::Analytic(n) => Some(n),
            QueryKind::Search => None,
        }
    }
}

/// Ordered catalog of query definitions.
#[derive(Debug, Clone)]
pub struct QueryCatalog {
    definitions: Vec<QueryDefinition>,
    search_index: usize,
}

impl QueryCatalog {
    /// Loads and validates the built-in catalog.
    pub fn load() -> Result<Self> {
        let catalog = Self::from_definitions(QUERIES.iter().copied())?;
        debug!(
            "Loaded query catalog with {} analytics",
            catalog.analytics().count()
        );
        Ok(catalog)
    }

    /// Builds a catalog from arbitrary definitions, validating them first.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = QueryDefinition>,
    ) -> Result<Self> {
        let definitions: Vec<QueryDefinition> = definitions.into_iter().collect();
        validate_definitions(&definitions)?;

        let search_index = definitions
            .iter()
            .position(|def| def.kind == QueryKind::Search)
            .ok_or_else(|| BookscapeError::catalog("no search definition"))?;

        Ok(Self {
            definitions,
            search_index,
        })
    }

    /// Finds a definition by its exact label.
    pub fn lookup(&self, label: &str) -> Result<&QueryDefinition> {
        self.definitions
            .iter()
            .find(|def| def.label == label)
            .ok_or_else(|| BookscapeError::not_found(format!("no query labelled '{label}'")))
    }

    /// Finds an analytic by its 1-based number.
    pub fn lookup_number(&self, number: usize) -> Result<&QueryDefinition> {
        self.analytics()
            .find(|def| def.number().map(usize::from) == Some(number))
            .ok_or_else(|| BookscapeError::not_found(format!("no analytic numbered {number}")))
    }

    /// The explore-mode title search.
    pub fn explore_search(&self) -> &QueryDefinition {
        &self.definitions[self.search_index]
    }

    /// The numbered analytics, in presentation order.
    pub fn analytics(&self) -> impl Iterator<Item = &QueryDefinition> {
        self.definitions
            .iter()
            .filter(|def| matches!(def.kind, QueryKind::Analytic(_)))
    }

    /// Every definition, in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = &QueryDefinition> {
        self.definitions.iter()
    }

    /// Total number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns true if the catalog holds no definitions.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
