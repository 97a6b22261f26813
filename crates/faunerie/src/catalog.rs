//! In-memory tag catalog used for tag pattern resolution and result decoding.

use std::collections::BTreeSet;
use std::time::Instant;

use fnv::FnvHashMap;
use rayon::prelude::*;

use crate::error::Result;
use crate::query::TagPattern;
use crate::store::Store;

/// Catalogs at least this large are matched in parallel.
const PARALLEL_RESOLVE_THRESHOLD: usize = 4096;

/// Snapshot of every known tag id and name.
///
/// The catalog is immutable once built; a reload builds a new catalog and
/// replaces the old one wholesale.
#[derive(Debug, Clone, Default)]
pub struct TagCatalog {
    entries: Vec<(i64, String)>,
    names: FnvHashMap<i64, String>,
}

impl TagCatalog {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (i64, String)>,
    {
        let entries = entries.into_iter().collect::<Vec<_>>();
        let names = entries
            .iter()
            .map(|(id, name)| (*id, name.clone()))
            .collect::<FnvHashMap<_, _>>();
        Self { entries, names }
    }

    /// Reads all (id, name) pairs from the store.
    pub fn load(store: &Store) -> Result<Self> {
        let started = Instant::now();
        let catalog = Self::from_entries(store.tag_names()?);
        log::info!(
            "tag catalog loaded tags={} load_ms={}",
            catalog.len(),
            started.elapsed().as_millis()
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn name(&self, id: i64) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Returns the ids of every tag whose name matches the glob pattern.
    pub fn resolve_pattern(&self, pattern: &str) -> BTreeSet<i64> {
        let pattern = TagPattern::new(pattern);
        if self.entries.len() < PARALLEL_RESOLVE_THRESHOLD {
            return self
                .entries
                .iter()
                .filter(|(_, name)| pattern.matches(name))
                .map(|(id, _)| *id)
                .collect();
        }
        self.entries
            .par_iter()
            .filter(|(_, name)| pattern.matches(name))
            .map(|(id, _)| *id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> TagCatalog {
        TagCatalog::from_entries([
            (1, "red".to_string()),
            (2, "blue".to_string()),
            (3, "green".to_string()),
        ])
    }

    #[test]
    fn resolve_prefix_pattern() {
        assert_eq!(colors().resolve_pattern("re*"), BTreeSet::from([1]));
    }

    #[test]
    fn resolve_infix_pattern_matches_every_name_containing_it() {
        assert_eq!(colors().resolve_pattern("*e*"), BTreeSet::from([1, 2, 3]));
        assert_eq!(colors().resolve_pattern("*ee*"), BTreeSet::from([3]));
    }

    #[test]
    fn resolve_is_anchored_and_case_sensitive() {
        let catalog = colors();
        assert!(catalog.resolve_pattern("e").is_empty());
        assert!(catalog.resolve_pattern("RED").is_empty());
        assert_eq!(catalog.resolve_pattern("?lue"), BTreeSet::from([2]));
    }

    #[test]
    fn name_lookup_misses_are_none() {
        let catalog = colors();
        assert_eq!(catalog.name(3), Some("green"));
        assert_eq!(catalog.name(42), None);
    }

    #[test]
    fn large_catalog_resolves_in_parallel_with_same_result() {
        let catalog = TagCatalog::from_entries(
            (0..10_000).map(|id| (id, format!("tag_{id}"))),
        );
        assert_eq!(
            catalog.resolve_pattern("tag_99?"),
            (990..1000).collect::<BTreeSet<_>>()
        );
        assert_eq!(catalog.resolve_pattern("tag_*").len(), 10_000);
    }

    #[test]
    fn empty_catalog_resolves_nothing() {
        let catalog = TagCatalog::default();
        assert!(catalog.is_empty());
        assert!(catalog.resolve_pattern("*").is_empty());
    }
}
