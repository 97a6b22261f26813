//! Key/value properties kept alongside the collection in the `metadata`
//! table.

use rusqlite::{params, OptionalExtension};

use crate::error::{FaunerieError, Result};

use super::schema::METADATA_SCHEMA;
use super::Store;

impl Store {
    pub fn property(&self, key: &str) -> Result<Option<String>> {
        if !self.has_table("metadata")? {
            return Ok(None);
        }
        let value = self
            .connection()
            .query_row(
                "SELECT value FROM metadata WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set_property(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_writable()?;
        self.connection().execute(METADATA_SCHEMA, [])?;
        self.connection().execute(
            "INSERT INTO metadata (key, value) VALUES (?1, ?2) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    /// Removes a property. Returns whether it existed.
    pub fn remove_property(&self, key: &str) -> Result<bool> {
        self.ensure_writable()?;
        if !self.has_table("metadata")? {
            return Ok(false);
        }
        let removed = self
            .connection()
            .execute("DELETE FROM metadata WHERE key = ?1", params![key])?;
        Ok(removed > 0)
    }

    pub fn clear_properties(&self) -> Result<()> {
        self.ensure_writable()?;
        if self.has_table("metadata")? {
            self.connection().execute("DELETE FROM metadata", [])?;
        }
        Ok(())
    }

    pub fn property_count(&self) -> Result<u64> {
        if !self.has_table("metadata")? {
            return Ok(0);
        }
        let count = self
            .connection()
            .query_row("SELECT COUNT(*) FROM metadata", [], |row| row.get::<_, i64>(0))?;
        Ok(count.max(0) as u64)
    }

    fn ensure_writable(&self) -> Result<()> {
        if self.is_read_only() {
            return Err(FaunerieError::ReadOnly);
        }
        Ok(())
    }
}
