//! BookScape Explorer - browse and analyze a catalog of history books.
//!
//! This library exposes the core modules for use by the binary and by
//! integration tests.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod connection;
pub mod db;
pub mod error;
pub mod logging;
pub mod output;
pub mod query;
pub mod tui;
