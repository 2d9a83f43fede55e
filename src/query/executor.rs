//! Parameterized execution of catalog queries.
//!
//! Binds parameters, runs one definition against an open session and turns the
//! outcome into a tagged [`ExecutionResult`]. Nothing past this boundary sees a
//! driver error as an `Err`.

use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::catalog::QueryDefinition;
use crate::db::{DatabaseClient, QueryResult, Row};
use crate::error::{BookscapeError, Result};

/// Column names zipped with the fetched rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultTable {
    /// Column names in result order.
    pub columns: Vec<String>,
    /// Rows, each as wide as `columns`.
    pub rows: Vec<Row>,
}

impl ResultTable {
    /// Builds a table from a driver result, checking every row's width.
    pub fn from_query_result(result: QueryResult) -> Result<Self> {
        let columns: Vec<String> = result
            .columns
            .into_iter()
            .map(|col| col.name)
            .collect();

        if let Some((index, row)) = result
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(BookscapeError::internal(format!(
                "row {} has {} values but the result has {} columns",
                index + 1,
                row.len(),
                columns.len()
            )));
        }

        Ok(Self {
            columns,
            rows: result.rows,
        })
    }

    /// Returns the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Outcome of running one query definition.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionResult {
    /// At least one row came back.
    Success(ResultTable),
    /// The query ran and matched nothing.
    Empty,
    /// The query could not be run, or the engine rejected it.
    Failure(BookscapeError),
}

impl ExecutionResult {
    /// Returns true for `Failure`.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Returns the result table, if any.
    pub fn table(&self) -> Option<&ResultTable> {
        match self {
            Self::Success(table) => Some(table),
            _ => None,
        }
    }

    /// Returns the failure, if any.
    pub fn error(&self) -> Option<&BookscapeError> {
        match self {
            Self::Failure(error) => Some(error),
            _ => None,
        }
    }
}

/// Wraps a keyword as a substring pattern for `LIKE`.
///
/// `%` and `_` inside the keyword are passed through as wildcards.
pub fn like_pattern(keyword: &str) -> String {
    format!("%{keyword}%")
}

/// Builds the bound parameters for an optional keyword.
///
/// An empty keyword counts as no keyword.
pub fn keyword_params(keyword: Option<&str>) -> Vec<String> {
    match keyword {
        Some(keyword) if !keyword.is_empty() => vec![like_pattern(keyword)],
        _ => Vec::new(),
    }
}

/// Runs catalog definitions against a single open session.
pub struct QueryExecutor<'a> {
    db: &'a mut dyn DatabaseClient,
}

impl<'a> QueryExecutor<'a> {
    /// Creates an executor over an open session.
    pub fn new(db: &'a mut dyn DatabaseClient) -> Self {
        Self { db }
    }

    /// Executes a definition with already-prepared parameters.
    ///
    /// The parameter count is checked before the store is contacted.
    pub async fn execute(
        &mut self,
        definition: &QueryDefinition,
        params: &[String],
    ) -> ExecutionResult {
        let expected = definition.param_count();
        if params.len() != expected {
            let error = BookscapeError::invalid_argument(format!(
                "'{}' expects {} parameter(s), got {}",
                definition.label,
                expected,
                params.len()
            ));
            warn!("Rejected {}: {}", definition.label, error);
            return ExecutionResult::Failure(error);
        }

        match self.execute_immediate(definition, params).await {
            Ok(table) if table.rows.is_empty() => {
                info!("No results for {}", definition.label);
                ExecutionResult::Empty
            }
            Ok(table) => ExecutionResult::Success(table),
            Err(error) => {
                warn!("{} failed: {}", definition.label, error);
                ExecutionResult::Failure(error)
            }
        }
    }

    /// Executes a definition with an optional search keyword.
    pub async fn execute_with_keyword(
        &mut self,
        definition: &QueryDefinition,
        keyword: Option<&str>,
    ) -> ExecutionResult {
        let params = keyword_params(keyword);
        self.execute(definition, &params).await
    }

    async fn execute_immediate(
        &mut self,
        definition: &QueryDefinition,
        params: &[String],
    ) -> Result<ResultTable> {
        let sql = definition.template_for(self.db.backend());

        let start = Instant::now();
        let result = self.db.execute_query(sql, params).await?;
        debug!(
            "Executed {} in {:?} ({} rows)",
            definition.label,
            start.elapsed(),
            result.row_count()
        );

        ResultTable::from_query_result(result)
    }
}
