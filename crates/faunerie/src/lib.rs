//! Tagged media collection search library.
//!
//! This crate provides the query side of a tagged media library stored in
//! SQLite:
//! - Compiling search queries (`red, -blue OR (score.gt:10 sky)`) into SQL
//!   filters
//! - An in-memory tag catalog for wildcard tag resolution
//! - Decoding joined result rows into [`MediaRecord`]s
//! - Tag details, implications, and a small property store

pub mod catalog;
pub mod config;
pub mod decode;
pub mod error;
pub mod query;
pub mod record;
pub mod search;
pub mod store;

// Re-export main types
pub use catalog::TagCatalog;
pub use config::LibraryOptions;
pub use error::{FaunerieError, Result};
pub use query::{QueryParser, QueryToken};
pub use record::{Intensities, MediaRecord, Representations, Tag};
pub use search::{Faunerie, SearchOptions};
pub use store::Store;
