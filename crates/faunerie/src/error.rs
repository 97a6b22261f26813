use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FaunerieError {
    #[error("Unsupported '{operator}' ({description}) operator in '{term}'")]
    UnsupportedOperator {
        operator: char,
        description: &'static str,
        term: String,
    },

    #[error("Unrecognized numeric qualifier '{qualifier}' in '{term}'")]
    UnrecognizedQualifier { qualifier: String, term: String },

    #[error("Invalid date/time value for '{namespace}': {value:?}")]
    InvalidDateValue { namespace: String, value: String },

    #[error("Invalid numeric value for '{namespace}': {value:?}")]
    InvalidNumericValue { namespace: String, value: String },

    #[error("'{namespace}' does not accept a numeric qualifier")]
    QualifierNotAccepted { namespace: String },

    #[error("Invalid value for '{namespace}': {value:?}")]
    InvalidValue { namespace: String, value: String },

    #[error("Unsupported use of '{namespace}'")]
    UnimplementedNamespace { namespace: String },

    #[error("No tags matching '{pattern}' could be found")]
    NoMatchingTags { pattern: String },

    #[error("Unbalanced parenthesis near character {position} in '{query}'")]
    UnbalancedParenthesis { query: String, position: usize },

    #[error("Malformed query '{query}': {reason}")]
    MalformedQuery { query: String, reason: &'static str },

    #[error("A search query needs to be shorter than {limit} characters (got {length})")]
    QueryTooLong { length: usize, limit: usize },

    #[error("This search query leads to an internal query that is too large")]
    QueryTooComplex,

    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("The library is open in read-only mode")]
    ReadOnly,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl FaunerieError {
    /// Returns true for errors raised while compiling a query, before any
    /// store round-trip.
    pub fn is_query_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedOperator { .. }
                | Self::UnrecognizedQualifier { .. }
                | Self::InvalidDateValue { .. }
                | Self::InvalidNumericValue { .. }
                | Self::QualifierNotAccepted { .. }
                | Self::InvalidValue { .. }
                | Self::UnimplementedNamespace { .. }
                | Self::NoMatchingTags { .. }
                | Self::UnbalancedParenthesis { .. }
                | Self::MalformedQuery { .. }
                | Self::QueryTooLong { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FaunerieError>;
