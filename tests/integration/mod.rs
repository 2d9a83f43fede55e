//! Integration tests for BookScape.

pub mod catalog_test;
pub mod common;
pub mod dashboard_test;
pub mod execution_test;
pub mod mysql_test;
