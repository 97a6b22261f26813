//! Faunerie - main API for a tagged media library.

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{SecondsFormat, Utc};
use parking_lot::{Mutex, RwLock};

use super::executor::{record_statement, search_records, SearchOptions};
use crate::catalog::TagCatalog;
use crate::config::LibraryOptions;
use crate::decode::decode_rows;
use crate::error::{FaunerieError, Result};
use crate::record::{MediaRecord, Tag};
use crate::store::Store;

/// Property stamped with the last writable open, as an RFC 3339 UTC time.
pub const OPEN_TIMESTAMP_PROPERTY: &str = "libfaunerie_timestamp";

/// An open library: one store connection plus the tag catalog snapshot.
///
/// Searches hold the catalog read guard from compilation through decoding;
/// [`Faunerie::reload_tags`] swaps the catalog under the write guard, so a
/// reload waits for in-flight searches and new searches see the new catalog.
pub struct Faunerie {
    store: Mutex<Store>,
    catalog: RwLock<TagCatalog>,
    options: LibraryOptions,
}

impl std::fmt::Debug for Faunerie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Faunerie")
            .field("database", &self.options.database)
            .field("read_only", &self.options.read_only)
            .field("tags", &self.catalog.read().len())
            .finish()
    }
}

impl Faunerie {
    /// Opens the library folder named by `options`.
    pub fn open(options: LibraryOptions) -> Result<Self> {
        let started = Instant::now();
        options.validate()?;
        let database = options.database_file();
        if !database.is_file() {
            return Err(FaunerieError::PathNotFound(database));
        }

        let mut store = Store::open(&database, options.read_only)?;
        store.set_verbose(options.verbose);
        let library = Self::from_store(store, options)?;
        if !library.options.read_only {
            let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
            library.set_property(OPEN_TIMESTAMP_PROPERTY, &stamp)?;
        }
        log::info!(
            "library opened database={} open_ms={}",
            library.options.database.display(),
            started.elapsed().as_millis()
        );
        Ok(library)
    }

    /// Wraps an already open store and loads its catalog.
    pub fn from_store(store: Store, options: LibraryOptions) -> Result<Self> {
        let catalog = TagCatalog::load(&store)?;
        Ok(Self {
            store: Mutex::new(store),
            catalog: RwLock::new(catalog),
            options,
        })
    }

    pub fn options(&self) -> &LibraryOptions {
        &self.options
    }

    #[cfg(test)]
    pub(super) fn store(&self) -> parking_lot::MutexGuard<'_, Store> {
        self.store.lock()
    }

    /// Runs a query with the library's unknown-tag setting.
    pub fn search(&self, query: &str) -> Result<Vec<MediaRecord>> {
        self.search_with(query, self.options.allow_unknown_tags)
    }

    pub fn search_with(&self, query: &str, allow_unknown_tags: bool) -> Result<Vec<MediaRecord>> {
        let options = SearchOptions {
            allow_unknown_tags,
            max_query_length: self.options.max_query_length,
            allow_exceed_length: false,
        };
        self.search_with_options(query, options)
    }

    pub fn search_with_options(
        &self,
        query: &str,
        options: SearchOptions,
    ) -> Result<Vec<MediaRecord>> {
        let catalog = self.catalog.read();
        let store = self.store.lock();
        search_records(&store, &catalog, query, options)
    }

    pub fn all_records(&self) -> Result<Vec<MediaRecord>> {
        let catalog = self.catalog.read();
        let store = self.store.lock();
        let rows = store.raw_rows(&record_statement(None), [])?;
        Ok(decode_rows(rows, &catalog))
    }

    pub fn all_records_by_id(&self) -> Result<BTreeMap<i64, MediaRecord>> {
        Ok(self
            .all_records()?
            .into_iter()
            .map(|record| (record.id, record))
            .collect())
    }

    pub fn get_record(&self, id: i64) -> Result<Option<MediaRecord>> {
        let catalog = self.catalog.read();
        let store = self.store.lock();
        let rows = store.raw_rows(&record_statement(Some("images.id = ?1")), [id])?;
        Ok(decode_rows(rows, &catalog).into_iter().next())
    }

    pub fn count_records(&self) -> Result<u64> {
        self.store.lock().count_records()
    }

    /// Re-reads the catalog from the store and swaps it in.
    pub fn reload_tags(&self) -> Result<()> {
        let catalog = {
            let store = self.store.lock();
            TagCatalog::load(&store)?
        };
        *self.catalog.write() = catalog;
        Ok(())
    }

    pub fn tag_count(&self) -> usize {
        self.catalog.read().len()
    }

    pub fn tag_name(&self, id: i64) -> Option<String> {
        self.catalog.read().name(id).map(str::to_string)
    }

    pub fn tag(&self, id: i64) -> Result<Option<Tag>> {
        self.store.lock().tag(id)
    }

    pub fn tag_by_name(&self, name: &str) -> Result<Option<Tag>> {
        self.store.lock().tag_by_name(name)
    }

    pub fn implied_tag_ids(&self, id: i64) -> Result<Vec<i64>> {
        self.tag(id)?
            .map(|tag| tag.implications)
            .ok_or_else(|| FaunerieError::NotFound(format!("tag {id}")))
    }

    pub fn implied_tag_ids_by_name(&self, name: &str) -> Result<Vec<i64>> {
        self.tag_by_name(name)?
            .map(|tag| tag.implications)
            .ok_or_else(|| FaunerieError::NotFound(format!("tag '{name}'")))
    }

    /// Names of the tags implied by `id`; `None` where an implied id is
    /// missing from the catalog.
    pub fn implied_tag_names(&self, id: i64) -> Result<Vec<Option<String>>> {
        let ids = self.implied_tag_ids(id)?;
        Ok(self.names_for(&ids))
    }

    pub fn implied_tag_names_by_name(&self, name: &str) -> Result<Vec<Option<String>>> {
        let ids = self.implied_tag_ids_by_name(name)?;
        Ok(self.names_for(&ids))
    }

    fn names_for(&self, ids: &[i64]) -> Vec<Option<String>> {
        let catalog = self.catalog.read();
        ids.iter()
            .map(|id| catalog.name(*id).map(str::to_string))
            .collect()
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    pub fn property(&self, key: &str) -> Result<Option<String>> {
        self.store.lock().property(key)
    }

    pub fn set_property(&self, key: &str, value: &str) -> Result<()> {
        self.store.lock().set_property(key, value)
    }

    pub fn remove_property(&self, key: &str) -> Result<bool> {
        self.store.lock().remove_property(key)
    }

    pub fn clear_properties(&self) -> Result<()> {
        self.store.lock().clear_properties()
    }

    pub fn property_count(&self) -> Result<u64> {
        self.store.lock().property_count()
    }
}
