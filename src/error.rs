//! Error types for BookScape.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for BookScape operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookscapeError {
    /// Database connection errors (host unreachable, auth failed, unknown database).
    #[error("Connection error: {0}")]
    Connection(String),

    /// The caller supplied the wrong parameters for a query definition.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Query execution errors (syntax errors, missing tables, timeouts, etc.)
    #[error("Query error: {0}")]
    Query(String),

    /// A catalog lookup did not match any query definition.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The built-in query catalog failed validation.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Configuration errors (invalid config file, bad connection string, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal application errors (unexpected states, terminal failures, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BookscapeError {
    /// Creates a connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates an invalid argument error with the given message.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a not-found error with the given message.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Creates a catalog validation error with the given message.
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection(_) => "Connection Error",
            Self::InvalidArgument(_) => "Invalid Argument",
            Self::Query(_) => "Query Error",
            Self::NotFound(_) => "Not Found",
            Self::Catalog(_) => "Catalog Error",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }

    /// Returns the message without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Connection(msg)
            | Self::InvalidArgument(msg)
            | Self::Query(msg)
            | Self::NotFound(msg)
            | Self::Catalog(msg)
            | Self::Config(msg)
            | Self::Internal(msg) => msg,
        }
    }
}

/// Result type alias using BookscapeError.
pub type Result<T> = std::result::Result<T, BookscapeError>;
