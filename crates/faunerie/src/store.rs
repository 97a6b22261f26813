//! SQLite access for the collection database.

mod properties;
mod rows;
mod schema;

#[cfg(test)]
pub(crate) mod fixtures;

use std::path::Path;
use std::time::Instant;

use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Params, Row};

use crate::decode::parse_packed_ids;
use crate::error::{FaunerieError, Result};
use crate::record::Tag;

pub use rows::{RawRow, RECORD_COLUMNS, RECORD_SOURCE};
pub use schema::{METADATA_SCHEMA, SCHEMA};

const TAG_COLUMNS: &str =
    "id, name, alias, implications, category, description, description_short, slug";

pub struct Store {
    conn: Connection,
    read_only: bool,
    verbose: bool,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("path", &self.conn.path())
            .field("read_only", &self.read_only)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl Store {
    pub fn open(path: impl AsRef<Path>, read_only: bool) -> Result<Self> {
        let path = path.as_ref();
        let conn = if read_only {
            Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI,
            )?
        } else {
            Connection::open(path)?
        };
        log::info!(
            "collection store opened path={} read_only={}",
            path.display(),
            read_only
        );
        Self::with_connection(conn, read_only)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?, false)
    }

    fn with_connection(conn: Connection, read_only: bool) -> Result<Self> {
        // Tag and string-namespace patterns are case-sensitive.
        conn.execute_batch("PRAGMA case_sensitive_like = ON;")?;
        Ok(Self {
            conn,
            read_only,
            verbose: false,
        })
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Creates the collection tables in an empty database.
    pub fn initialize_schema(&self) -> Result<()> {
        if self.read_only {
            return Err(FaunerieError::ReadOnly);
        }
        self.conn.execute_batch(SCHEMA)?;
        self.conn.execute(METADATA_SCHEMA, [])?;
        Ok(())
    }

    pub fn has_table(&self, name: &str) -> Result<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                params![name],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    // -----------------------------------------------------------------------
    // Tags
    // -----------------------------------------------------------------------

    /// Every (id, name) pair in the tag table.
    pub fn tag_names(&self) -> Result<Vec<(i64, String)>> {
        let sql = "SELECT id, name FROM tags ORDER BY id";
        self.trace(sql);
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn tag(&self, id: i64) -> Result<Option<Tag>> {
        let sql = format!("SELECT {TAG_COLUMNS} FROM tags WHERE id = ?1");
        self.trace(&sql);
        let tag = self
            .conn
            .query_row(&sql, params![id], tag_from_row)
            .optional()?;
        Ok(tag)
    }

    pub fn tag_by_name(&self, name: &str) -> Result<Option<Tag>> {
        let sql = format!("SELECT {TAG_COLUMNS} FROM tags WHERE name = ?1");
        self.trace(&sql);
        let tag = self
            .conn
            .query_row(&sql, params![name], tag_from_row)
            .optional()?;
        Ok(tag)
    }

    // -----------------------------------------------------------------------
    // Records
    // -----------------------------------------------------------------------

    /// Runs a record retrieval statement selecting [`RECORD_COLUMNS`].
    pub fn raw_rows<P: Params>(&self, sql: &str, params: P) -> Result<Vec<RawRow>> {
        let started = Instant::now();
        self.trace(sql);
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, RawRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        if self.verbose {
            log::debug!(
                "record query finished rows={} query_ms={}",
                rows.len(),
                started.elapsed().as_millis()
            );
        }
        Ok(rows)
    }

    /// Number of items in the `images` table, joined or not.
    pub fn count_records(&self) -> Result<u64> {
        let sql = "SELECT COUNT(*) FROM images";
        self.trace(sql);
        let count = self
            .conn
            .query_row(sql, [], |row| row.get::<_, i64>(0))?;
        Ok(count.max(0) as u64)
    }

    fn trace(&self, sql: &str) {
        if self.verbose {
            log::debug!("sql={sql}");
        }
    }
}

fn tag_from_row(row: &Row<'_>) -> rusqlite::Result<Tag> {
    let implications: Option<String> = row.get("implications")?;
    Ok(Tag {
        id: row.get("id")?,
        name: row.get("name")?,
        alias: row.get("alias")?,
        implications: implications
            .as_deref()
            .map(parse_packed_ids)
            .unwrap_or_default(),
        category: row.get("category")?,
        description: row.get("description")?,
        short_description: row.get("description_short")?,
        slug: row.get("slug")?,
    })
}
