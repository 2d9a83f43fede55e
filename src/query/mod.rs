//! Query execution for BookScape.
//!
//! This module isolates parameter binding, execution and result shaping from
//! the dashboard and the presentation layer.

pub mod executor;

pub use executor::{keyword_params, like_pattern, ExecutionResult, QueryExecutor, ResultTable};
