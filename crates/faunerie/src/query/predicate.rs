//! Compiles one atomic query term into an SQL filter fragment.

use crate::catalog::TagCatalog;
use crate::error::{FaunerieError, Result};

use super::date_filter::parse_date_seconds;
use super::escape::escape_like_value;
use super::namespace::{lookup_namespace, Comparison, NamespaceKind};

/// Column holding the packed `,id1,id2,...,` tag list.
pub const PACKED_TAGS_COLUMN: &str = "image_tags.tags";

/// Fragment emitted for unknown tags when they are allowed. Packed tag lists
/// always start with a comma, so this pattern never matches.
pub const NEVER_MATCHING_TAGS: &str = "image_tags.tags LIKE 'INVALID_TAG'";

const RESERVED_OPERATORS: &[(char, &str)] = &[
    ('~', "fuzzy search"),
    ('\\', "escape"),
    ('^', "boosting"),
    ('"', "quotation"),
];

/// Term compiler bound to a catalog snapshot.
#[derive(Debug, Clone, Copy)]
pub struct PredicateCompiler<'a> {
    catalog: &'a TagCatalog,
    allow_unknown_tags: bool,
}

impl<'a> PredicateCompiler<'a> {
    pub fn new(catalog: &'a TagCatalog, allow_unknown_tags: bool) -> Self {
        Self {
            catalog,
            allow_unknown_tags,
        }
    }

    /// Compiles a single term. Returns an empty fragment for an empty term.
    pub fn compile(&self, term: &str) -> Result<String> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(String::new());
        }

        reject_reserved_operators(term)?;

        let Some((prefix, value)) = term.split_once(':') else {
            return self.compile_tag_pattern(term);
        };

        let (namespace, qualifier) = match prefix.split_once('.') {
            Some((namespace, qualifier)) => (
                namespace.to_ascii_lowercase(),
                Some(qualifier.to_ascii_lowercase()),
            ),
            None => (prefix.to_ascii_lowercase(), None),
        };

        let comparison = match qualifier {
            Some(qualifier) => Some(Comparison::parse_qualifier(&qualifier).ok_or_else(|| {
                FaunerieError::UnrecognizedQualifier {
                    qualifier: qualifier.clone(),
                    term: term.to_string(),
                }
            })?),
            None => None,
        };

        let Some(kind) = lookup_namespace(&namespace) else {
            return self.compile_tag_pattern(term);
        };

        match kind {
            NamespaceKind::Date { column } => {
                let seconds = parse_date_seconds(value).ok_or_else(|| {
                    FaunerieError::InvalidDateValue {
                        namespace: namespace.clone(),
                        value: value.to_string(),
                    }
                })?;
                Ok(comparison_fragment(column, comparison, seconds))
            }
            NamespaceKind::Numeric { column } => {
                let number = value
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|number| number.is_finite())
                    .ok_or_else(|| FaunerieError::InvalidNumericValue {
                        namespace: namespace.clone(),
                        value: value.to_string(),
                    })?;
                Ok(comparison_fragment(column, comparison, number))
            }
            NamespaceKind::StringPattern { column } => {
                if comparison.is_some() {
                    return Err(FaunerieError::QualifierNotAccepted { namespace });
                }
                Ok(format!(
                    "{column} LIKE '{}' ESCAPE '\\'",
                    escape_like_value(value)
                ))
            }
            NamespaceKind::Enumerated { allowed } => {
                if value == "hidden" || !allowed.contains(&value) {
                    return Err(FaunerieError::InvalidValue {
                        namespace,
                        value: value.to_string(),
                    });
                }
                if comparison.is_some() {
                    return Err(FaunerieError::QualifierNotAccepted { namespace });
                }
                // Personal lists are not part of the stored collection.
                Err(FaunerieError::UnimplementedNamespace { namespace })
            }
            NamespaceKind::Unimplemented => Err(FaunerieError::UnimplementedNamespace { namespace }),
        }
    }

    /// Resolves a tag glob against the catalog into a packed-list containment
    /// disjunction.
    fn compile_tag_pattern(&self, pattern: &str) -> Result<String> {
        let matching = self.catalog.resolve_pattern(pattern);

        if matching.is_empty() {
            if self.allow_unknown_tags {
                return Ok(NEVER_MATCHING_TAGS.to_string());
            }
            return Err(FaunerieError::NoMatchingTags {
                pattern: pattern.to_string(),
            });
        }

        let clauses = matching
            .iter()
            .map(|id| format!("{PACKED_TAGS_COLUMN} LIKE '%,{id},%'"))
            .collect::<Vec<_>>();
        Ok(format!("({})", clauses.join(" OR ")))
    }
}

fn reject_reserved_operators(term: &str) -> Result<()> {
    for &(operator, description) in RESERVED_OPERATORS {
        if term.contains(operator) {
            return Err(FaunerieError::UnsupportedOperator {
                operator,
                description,
                term: term.to_string(),
            });
        }
    }
    Ok(())
}

fn comparison_fragment(column: &str, comparison: Option<Comparison>, value: f64) -> String {
    let operator = comparison.unwrap_or(Comparison::Eq).as_sql();
    format!("{column}{operator}{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> TagCatalog {
        TagCatalog::from_entries([
            (1, "red".to_string()),
            (2, "blue".to_string()),
            (3, "green".to_string()),
            (4, "artist:some_one".to_string()),
        ])
    }

    fn compile(term: &str) -> Result<String> {
        let catalog = catalog();
        PredicateCompiler::new(&catalog, false).compile(term)
    }

    #[test]
    fn empty_term_compiles_to_empty_fragment() {
        assert_eq!(compile("   ").expect("compile"), "");
    }

    #[test]
    fn reserved_operators_are_rejected() {
        for term in ["red~", "re\\d", "red^2", "\"red\""] {
            match compile(term) {
                Err(FaunerieError::UnsupportedOperator { term: offending, .. }) => {
                    assert_eq!(offending, term);
                }
                other => panic!("expected unsupported operator for {term}, got {other:?}"),
            }
        }
    }

    #[test]
    fn numeric_namespaces_compile_comparisons() {
        assert_eq!(compile("score:10").expect("compile"), "images.score=10");
        assert_eq!(compile("score.gte:10").expect("compile"), "images.score>=10");
        assert_eq!(compile("Width.LT:1.5").expect("compile"), "images.width<1.5");
        assert_eq!(compile("id:42").expect("compile"), "images.source_id=42");
        assert_eq!(
            compile("wilson_score.gt:-0.25").expect("compile"),
            "images.wilson_score>-0.25"
        );
    }

    #[test]
    fn invalid_numeric_value_is_rejected() {
        assert!(matches!(
            compile("aspect_ratio:abc"),
            Err(FaunerieError::InvalidNumericValue { .. })
        ));
        assert!(matches!(
            compile("score:inf"),
            Err(FaunerieError::InvalidNumericValue { .. })
        ));
        assert!(matches!(
            compile("score:NaN"),
            Err(FaunerieError::InvalidNumericValue { .. })
        ));
    }

    #[test]
    fn unrecognized_qualifier_is_rejected_before_namespace_dispatch() {
        match compile("foo.xyz:1") {
            Err(FaunerieError::UnrecognizedQualifier { qualifier, .. }) => {
                assert_eq!(qualifier, "xyz");
            }
            other => panic!("expected unrecognized qualifier, got {other:?}"),
        }
    }

    #[test]
    fn date_namespace_compares_epoch_seconds() {
        assert_eq!(
            compile("created_at:2020").expect("compile"),
            "images.created_at=1577836800"
        );
        assert_eq!(
            compile("created_at.lt:2020-02").expect("compile"),
            "images.created_at<1580515200"
        );
        assert!(matches!(
            compile("created_at:not-a-date"),
            Err(FaunerieError::InvalidDateValue { .. })
        ));
    }

    #[test]
    fn date_value_keeps_colons_after_the_first() {
        assert_eq!(
            compile("created_at.gte:1970-01-01T00:01").expect("compile"),
            "images.created_at>=60"
        );
    }

    #[test]
    fn string_namespaces_escape_and_translate_wildcards() {
        assert_eq!(
            compile("mime_type:image/*").expect("compile"),
            "images.mime_type LIKE 'image/%' ESCAPE '\\'"
        );
        assert_eq!(
            compile("description:it's 100%_done").expect("compile"),
            "images.description LIKE 'it''s 100\\%\\_done' ESCAPE '\\'"
        );
        assert_eq!(
            compile("source:*deviantart*").expect("compile"),
            "images.source_name LIKE '%deviantart%' ESCAPE '\\'"
        );
        assert_eq!(
            compile("source_url:https://example.com/*").expect("compile"),
            "images.source_url LIKE 'https://example.com/%' ESCAPE '\\'"
        );
    }

    #[test]
    fn string_namespaces_reject_qualifiers() {
        assert!(matches!(
            compile("description.lt:x"),
            Err(FaunerieError::QualifierNotAccepted { namespace }) if namespace == "description"
        ));
    }

    #[test]
    fn personal_namespace_validates_then_reports_unimplemented() {
        assert!(matches!(
            compile("my:hidden"),
            Err(FaunerieError::InvalidValue { .. })
        ));
        assert!(matches!(
            compile("my:everything"),
            Err(FaunerieError::InvalidValue { .. })
        ));
        assert!(matches!(
            compile("my.gt:faves"),
            Err(FaunerieError::QualifierNotAccepted { .. })
        ));
        assert!(matches!(
            compile("my:faves"),
            Err(FaunerieError::UnimplementedNamespace { namespace }) if namespace == "my"
        ));
    }

    #[test]
    fn uploader_and_faved_by_are_unimplemented() {
        for term in ["uploader:someone", "faved_by:someone"] {
            assert!(matches!(
                compile(term),
                Err(FaunerieError::UnimplementedNamespace { .. })
            ));
        }
    }

    #[test]
    fn bare_tag_compiles_to_packed_list_containment() {
        assert_eq!(
            compile("red").expect("compile"),
            "(image_tags.tags LIKE '%,1,%')"
        );
        assert_eq!(
            compile("*e*").expect("compile"),
            "(image_tags.tags LIKE '%,1,%' OR image_tags.tags LIKE '%,2,%' OR image_tags.tags LIKE '%,3,%' OR image_tags.tags LIKE '%,4,%')"
        );
    }

    #[test]
    fn unknown_namespace_uses_whole_term_as_tag_pattern() {
        assert_eq!(
            compile("artist:some_one").expect("compile"),
            "(image_tags.tags LIKE '%,4,%')"
        );
        assert_eq!(
            compile("artist:*").expect("compile"),
            "(image_tags.tags LIKE '%,4,%')"
        );
    }

    #[test]
    fn unknown_tags_fail_unless_allowed() {
        assert!(matches!(
            compile("purple"),
            Err(FaunerieError::NoMatchingTags { pattern }) if pattern == "purple"
        ));

        let catalog = catalog();
        let fragment = PredicateCompiler::new(&catalog, true)
            .compile("purple")
            .expect("compile");
        assert_eq!(fragment, NEVER_MATCHING_TAGS);
    }
}
