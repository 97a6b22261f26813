//! Query execution against the collection store.

use std::time::Instant;

use crate::catalog::TagCatalog;
use crate::decode::decode_rows;
use crate::error::{FaunerieError, Result};
use crate::query::{QueryParser, DEFAULT_MAX_QUERY_LENGTH};
use crate::record::MediaRecord;
use crate::store::{RawRow, Store, RECORD_COLUMNS, RECORD_SOURCE};

/// Query that skips compilation and returns the whole collection.
pub const MATCH_EVERYTHING: &str = "*";

const EXPRESSION_TOO_DEEP: &str = "Expression tree is too large";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub allow_unknown_tags: bool,
    pub max_query_length: usize,
    pub allow_exceed_length: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            allow_unknown_tags: false,
            max_query_length: DEFAULT_MAX_QUERY_LENGTH,
            allow_exceed_length: false,
        }
    }
}

/// Builds the retrieval statement. `None` selects every record.
pub fn record_statement(filter: Option<&str>) -> String {
    match filter {
        Some(filter) => format!(
            "SELECT {RECORD_COLUMNS} FROM {RECORD_SOURCE} WHERE {filter} ORDER BY images.id"
        ),
        None => format!("SELECT {RECORD_COLUMNS} FROM {RECORD_SOURCE} ORDER BY images.id"),
    }
}

/// True for SQLite's parser depth limit failure.
pub fn is_expression_too_deep(error: &rusqlite::Error) -> bool {
    match error {
        rusqlite::Error::SqliteFailure(_, Some(message)) => message.contains(EXPRESSION_TOO_DEEP),
        _ => false,
    }
}

/// Compiles `query` and returns the matching raw rows.
pub fn run_query(
    store: &Store,
    catalog: &TagCatalog,
    query: &str,
    options: SearchOptions,
) -> Result<Vec<RawRow>> {
    if query.trim() == MATCH_EVERYTHING {
        return store.raw_rows(&record_statement(None), []);
    }

    let compile_started = Instant::now();
    let filter = QueryParser::new(catalog, options.allow_unknown_tags)
        .with_max_length(options.max_query_length)
        .allow_exceed_length(options.allow_exceed_length)
        .compile(query)?;
    if store.is_verbose() {
        log::debug!(
            "query compiled query_len={} filter_len={} compile_ms={}",
            query.chars().count(),
            filter.len(),
            compile_started.elapsed().as_millis()
        );
    }

    store
        .raw_rows(&record_statement(Some(&filter)), [])
        .map_err(|error| match error {
            FaunerieError::Store(inner) if is_expression_too_deep(&inner) => {
                log::warn!(
                    "query too complex for the store query_len={} filter_len={}",
                    query.chars().count(),
                    filter.len()
                );
                FaunerieError::QueryTooComplex
            }
            other => other,
        })
}

/// Compiles, executes, and decodes in one pass over the same catalog.
pub fn search_records(
    store: &Store,
    catalog: &TagCatalog,
    query: &str,
    options: SearchOptions,
) -> Result<Vec<MediaRecord>> {
    let rows = run_query(store, catalog, query, options)?;
    Ok(decode_rows(rows, catalog))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statement_joins_side_tables_and_orders_by_id() {
        let statement = record_statement(Some("(images.score>1)"));
        assert!(statement.contains("JOIN image_tags ON images.id = image_tags.image_id"));
        assert!(statement.contains("JOIN image_intensities"));
        assert!(statement.contains("JOIN image_representations"));
        assert!(statement.ends_with("WHERE (images.score>1) ORDER BY images.id"));

        let everything = record_statement(None);
        assert!(!everything.contains("WHERE"));
    }

    #[test]
    fn depth_failure_is_detected_by_message() {
        let deep = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(1),
            Some("Expression tree is too large (maximum depth 1000)".to_string()),
        );
        assert!(is_expression_too_deep(&deep));

        let other = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(1),
            Some("no such column: images.bogus".to_string()),
        );
        assert!(!is_expression_too_deep(&other));
        assert!(!is_expression_too_deep(&rusqlite::Error::QueryReturnedNoRows));
    }

    #[test]
    fn query_errors_surface_before_the_store_is_touched() {
        let store = Store::open_in_memory().expect("open");
        let catalog = TagCatalog::default();
        let err = run_query(&store, &catalog, "score:abc", SearchOptions::default())
            .expect_err("expected error");
        assert!(err.is_query_error());
    }

    #[test]
    fn other_store_failures_pass_through() {
        // No schema, so the join fails with "no such table".
        let store = Store::open_in_memory().expect("open");
        let catalog = TagCatalog::default();
        let err = run_query(&store, &catalog, "", SearchOptions::default())
            .expect_err("expected error");
        assert!(matches!(err, FaunerieError::Store(_)));
    }
}
