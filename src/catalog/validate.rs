//! Startup validation of query templates.
//!
//! Uses sqlparser-rs with the MySQL dialect to check that every template is a
//! single read-only query whose placeholder count matches its definition.

use sqlparser::ast::Statement;
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::Parser;
use sqlparser::tokenizer::{Token, Tokenizer};
use std::collections::HashSet;

use super::{QueryDefinition, QueryKind};
use crate::error::{BookscapeError, Result};

/// Validates a full set of definitions.
///
/// Checks label uniqueness, that exactly one search definition exists, that
/// analytics are numbered 1..=n in order, and every template (including
/// dialect variants).
pub fn validate_definitions(definitions: &[QueryDefinition]) -> Result<()> {
    let mut labels = HashSet::new();
    for def in definitions {
        if !labels.insert(def.label) {
            return Err(BookscapeError::catalog(format!(
                "duplicate label '{}'",
                def.label
            )));
        }
    }

    let searches = definitions
        .iter()
        .filter(|def| def.kind == QueryKind::Search)
        .count();
    if searches != 1 {
        return Err(BookscapeError::catalog(format!(
            "expected exactly one search definition, found {searches}"
        )));
    }

    let numbers = definitions.iter().filter_map(|def| match def.kind {
        QueryKind::Analytic(n) => Some(n),
        QueryKind::Search => None,
    });
    for (expected, number) in (1..).zip(numbers) {
        if number != expected {
            return Err(BookscapeError::catalog(format!(
                "analytic numbered {number} found where {expected} was expected"
            )));
        }
    }

    for def in definitions {
        validate_template(def.label, def.template, def.requires_param)?;
        if let Some(variant) = def.sqlite_template {
            validate_template(def.label, variant, def.requires_param)?;
        }
    }

    Ok(())
}

/// Validates one template against its declared parameter requirement.
pub fn validate_template(label: &str, sql: &str, requires_param: bool) -> Result<()> {
    let dialect = MySqlDialect {};

    let statements = Parser::parse_sql(&dialect, sql).map_err(|e| {
        BookscapeError::catalog(format!("'{label}' does not parse: {e}"))
    })?;

    match statements.as_slice() {
        [Statement::Query(_)] => {}
        [_] => {
            return Err(BookscapeError::catalog(format!(
                "'{label}' is not a read-only SELECT"
            )))
        }
        _ => {
            return Err(BookscapeError::catalog(format!(
                "'{label}' must contain exactly one statement, found {}",
                statements.len()
            )))
        }
    }

    let placeholders = count_placeholders(sql)?;
    let expected = usize::from(requires_param);
    if placeholders != expected {
        return Err(BookscapeError::catalog(format!(
            "'{label}' has {placeholders} placeholder(s) but declares {expected}"
        )));
    }

    Ok(())
}

/// Counts bind placeholders, ignoring `?` inside string literals and comments.
pub fn count_placeholders(sql: &str) -> Result<usize> {
    let dialect = MySqlDialect {};
    let tokens = Tokenizer::new(&dialect, sql)
        .tokenize()
        .map_err(|e| BookscapeError::catalog(format!("cannot tokenize template: {e}")))?;

    Ok(tokens
        .iter()
        .filter(|token| matches!(token, Token::Placeholder(_)))
        .count())
}
