//! One-shot output formatting.
//!
//! Renders an execution outcome, or the analytics catalog, as text for a
//! terminal or as JSON for scripts.

use serde::Serialize;

use crate::catalog::QueryCatalog;
use crate::cli::OutputFormat;
use crate::db::Row;
use crate::error::{BookscapeError, Result};
use crate::query::ExecutionResult;
use crate::tui::widgets::results::EMPTY_NOTICE;
use crate::tui::widgets::table::TableView;

/// JSON record for one interaction.
#[derive(Debug, Serialize)]
struct JsonOutcome<'a> {
    query: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    columns: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rows: Option<&'a [Row]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonError<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonError<'a> {
    category: &'static str,
    message: &'a str,
}

#[derive(Debug, Serialize)]
struct JsonAnalytic<'a> {
    number: u8,
    label: &'a str,
    requires_keyword: bool,
}

/// Formats an outcome for the given output format.
pub fn format_outcome(
    label: &str,
    result: &ExecutionResult,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format_text(result)),
        OutputFormat::Json => format_json(label, result),
    }
}

/// Formats an outcome as a text table, the empty notice, or the error line.
pub fn format_text(result: &ExecutionResult) -> String {
    match result {
        // Zero width renders every value in full
        ExecutionResult::Success(table) => TableView::new(table).render_plain(0),
        ExecutionResult::Empty => EMPTY_NOTICE.to_string(),
        ExecutionResult::Failure(error) => format!("{}: {}", error.category(), error.message()),
    }
}

/// Formats an outcome as a JSON object.
pub fn format_json(label: &str, result: &ExecutionResult) -> Result<String> {
    let record = match result {
        ExecutionResult::Success(table) => JsonOutcome {
            query: label,
            status: "success",
            columns: Some(&table.columns),
            rows: Some(&table.rows),
            error: None,
        },
        ExecutionResult::Empty => JsonOutcome {
            query: label,
            status: "empty",
            columns: None,
            rows: Some(&[] as &[Row]),
            error: None,
        },
        ExecutionResult::Failure(error) => JsonOutcome {
            query: label,
            status: "failure",
            columns: None,
            rows: None,
            error: Some(JsonError {
                category: error.category(),
                message: error.message(),
            }),
        },
    };

    to_json(&record)
}

/// Formats the numbered analytics.
pub fn format_catalog(catalog: &QueryCatalog, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(catalog
            .analytics()
            .map(|def| {
                if def.requires_param {
                    format!("{} (needs --keyword)", def.label)
                } else {
                    def.label.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => {
            let entries: Vec<JsonAnalytic> = catalog
                .analytics()
                .filter_map(|def| {
                    def.number().map(|number| JsonAnalytic {
                        number,
                        label: def.label,
                        requires_keyword: def.requires_param,
                    })
                })
                .collect();
            to_json(&entries)
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| BookscapeError::internal(format!("Failed to serialize output: {e}")))
}
