//! Query compilation for collection search.
//!
//! This module turns a query string into an SQL filter expression:
//! - Tag glob matching against the catalog
//! - Per-namespace predicates (date, numeric, string pattern)
//! - Tokenizing boolean connectives, negation, and parenthesized groups
//! - Escaping between query values, `LIKE` patterns, and stored text

mod date_filter;
mod escape;
mod namespace;
mod parser;
mod pattern;
mod predicate;

pub use date_filter::{fill_date, parse_date_seconds};
pub use escape::{escape_like_value, unescape_stored_text};
pub use namespace::{lookup_namespace, Comparison, NamespaceKind};
pub use parser::{fold_tokens, QueryParser, QueryToken, DEFAULT_MAX_QUERY_LENGTH, MATCH_ALL};
pub use pattern::TagPattern;
pub use predicate::{PredicateCompiler, NEVER_MATCHING_TAGS, PACKED_TAGS_COLUMN};
