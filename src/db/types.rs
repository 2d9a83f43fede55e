//! Query result types for BookScape.
//!
//! Defines the structures used to represent raw query results from the database.

use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Represents the result of executing a SQL query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    /// Column metadata for the result set.
    pub columns: Vec<ColumnInfo>,

    /// Rows of data.
    pub rows: Vec<Row>,

    /// Time taken to execute the query.
    pub execution_time: Duration,
}

impl QueryResult {
    /// Creates a new empty query result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a query result with the given columns and rows.
    pub fn with_data(columns: Vec<ColumnInfo>, rows: Vec<Row>) -> Self {
        Self {
            columns,
            rows,
            execution_time: Duration::ZERO,
        }
    }

    /// Sets the execution time.
    pub fn with_execution_time(mut self, duration: Duration) -> Self {
        self.execution_time = duration;
        self
    }

    /// Returns the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the result set is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Metadata about a column in a result set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Column name.
    pub name: String,

    /// Column data type as reported by the driver.
    pub data_type: String,
}

impl ColumnInfo {
    /// Creates a new column info with the given name and type.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// A row of data from a query result.
pub type Row = Vec<Value>;

/// Represents a single value from a database query.
///
/// Serializes untagged, so JSON output carries plain scalars.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    /// NULL value.
    #[default]
    Null,

    /// Boolean value.
    Bool(bool),

    /// Signed integer (up to i64).
    Int(i64),

    /// Floating point number.
    Float(f64),

    /// Text value. DECIMAL results are kept in their textual form.
    String(String),

    /// Binary data.
    Bytes(Vec<u8>),
}

impl Value {
    /// Returns true if this value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Attempts to convert the value to a string representation.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
            Value::Bytes(b) => format!("<{} bytes>", b.len()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Null.to_display_string(), "NULL");
        assert_eq!(Value::Bool(true).to_display_string(), "true");
        assert_eq!(Value::Int(42).to_display_string(), "42");
        assert_eq!(Value::Float(4.25).to_display_string(), "4.25");
        assert_eq!(
            Value::String("1423.5000".to_string()).to_display_string(),
            "1423.5000"
        );
        assert_eq!(Value::Bytes(vec![1, 2, 3]).to_display_string(), "<3 bytes>");
    }

    #[test]
    fn test_value_is_null() {
        assert!(Value::Null.is_null());
        assert!(!Value::Bool(false).is_null());
        assert!(!Value::Int(0).is_null());
    }

    #[test]
    fn test_value_from_conversions() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(42i32), Value::Int(42));
        assert_eq!(Value::from(42i64), Value::Int(42));
        assert_eq!(Value::from(2.5f64), Value::Float(2.5));
        assert_eq!(Value::from("War"), Value::String("War".to_string()));
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(42i32)), Value::Int(42));
    }

    #[test]
    fn test_value_serializes_untagged() {
        let row = vec![
            Value::Null,
            Value::Int(7),
            Value::Float(3.5),
            Value::from("Penguin"),
        ];
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"[null,7,3.5,"Penguin"]"#);
    }

    #[test]
    fn test_query_result_with_data() {
        let columns = vec![
            ColumnInfo::new("isEbook", "TINYINT"),
            ColumnInfo::new("book_count", "BIGINT"),
        ];
        let rows = vec![
            vec![Value::Int(0), Value::Int(12)],
            vec![Value::Int(1), Value::Int(30)],
        ];

        let result = QueryResult::with_data(columns, rows);

        assert!(!result.is_empty());
        assert_eq!(result.row_count(), 2);
        assert_eq!(result.columns.len(), 2);
    }

    #[test]
    fn test_query_result_new_is_empty() {
        let result = QueryResult::new().with_execution_time(Duration::from_millis(5));
        assert!(result.is_empty());
        assert_eq!(result.execution_time, Duration::from_millis(5));
    }
}
