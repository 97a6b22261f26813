//! Collection search.
//!
//! This module provides:
//! - The [`Faunerie`] library API
//! - The executor that wraps compiled filters into retrieval statements

mod executor;
mod library;


// Re-export main types
pub use executor::{
    is_expression_too_deep, record_statement, run_query, search_records, SearchOptions,
    MATCH_EVERYTHING,
};
pub use library::{Faunerie, OPEN_TIMESTAMP_PROPERTY};
