//! Namespace table: maps the part of a term before `:` to the kind of
//! predicate it compiles to.

/// Comparison selected by a `.lt|.lte|.gt|.gte` qualifier, or equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl Comparison {
    pub fn parse_qualifier(raw: &str) -> Option<Self> {
        match raw {
            "lt" => Some(Self::Lt),
            "lte" => Some(Self::Lte),
            "gt" => Some(Self::Gt),
            "gte" => Some(Self::Gte),
            _ => None,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
        }
    }
}

/// What a recognized namespace compiles to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamespaceKind {
    /// Timestamp column compared against a (possibly partial) ISO-8601 date.
    Date { column: &'static str },
    /// Value restricted to a fixed set; recognized but not backed by data.
    Enumerated { allowed: &'static [&'static str] },
    /// Numeric column compared against a finite float.
    Numeric { column: &'static str },
    /// Text column matched with an escaped `LIKE` pattern.
    StringPattern { column: &'static str },
    /// Recognized namespace with no implementation.
    Unimplemented,
}

const MY_VALUES: &[&str] = &["upvotes", "downvotes", "faves", "uploads", "watched"];

const NAMESPACES: &[(&str, NamespaceKind)] = &[
    ("created_at", NamespaceKind::Date { column: "images.created_at" }),
    ("my", NamespaceKind::Enumerated { allowed: MY_VALUES }),
    ("uploader", NamespaceKind::Unimplemented),
    ("faved_by", NamespaceKind::Unimplemented),
    ("aspect_ratio", NamespaceKind::Numeric { column: "images.aspect_ratio" }),
    ("comment_count", NamespaceKind::Numeric { column: "images.comment_count" }),
    ("downvotes", NamespaceKind::Numeric { column: "images.downvotes" }),
    ("faves", NamespaceKind::Numeric { column: "images.faves" }),
    ("height", NamespaceKind::Numeric { column: "images.height" }),
    ("id", NamespaceKind::Numeric { column: "images.source_id" }),
    ("score", NamespaceKind::Numeric { column: "images.score" }),
    ("tag_count", NamespaceKind::Numeric { column: "images.tag_count" }),
    ("upvotes", NamespaceKind::Numeric { column: "images.upvotes" }),
    ("width", NamespaceKind::Numeric { column: "images.width" }),
    ("wilson_score", NamespaceKind::Numeric { column: "images.wilson_score" }),
    ("sha512_hash", NamespaceKind::StringPattern { column: "images.sha512_hash" }),
    ("orig_sha512_hash", NamespaceKind::StringPattern { column: "images.orig_sha512_hash" }),
    ("source_url", NamespaceKind::StringPattern { column: "images.source_url" }),
    ("source", NamespaceKind::StringPattern { column: "images.source_name" }),
    ("description", NamespaceKind::StringPattern { column: "images.description" }),
    ("mime_type", NamespaceKind::StringPattern { column: "images.mime_type" }),
];

/// Looks up a lower-cased namespace. `None` means the term is a tag pattern.
pub fn lookup_namespace(namespace: &str) -> Option<NamespaceKind> {
    NAMESPACES
        .iter()
        .find(|(name, _)| *name == namespace)
        .map(|(_, kind)| *kind)
}
