use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{FaunerieError, Result};
use crate::query::DEFAULT_MAX_QUERY_LENGTH;

/// Marker file identifying a library folder.
pub const INSTANCE_MARKER_FILENAME: &str = "instance.pbmk";
/// Collection database inside a library folder.
pub const DATABASE_FILENAME: &str = "current.pbdb";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryOptions {
    /// Library folder holding the marker and the database.
    pub database: PathBuf,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default = "default_max_query_length")]
    pub max_query_length: usize,
    #[serde(default)]
    pub allow_unknown_tags: bool,
}

fn default_max_query_length() -> usize {
    DEFAULT_MAX_QUERY_LENGTH
}

impl LibraryOptions {
    pub fn new(database: impl Into<PathBuf>) -> Self {
        Self {
            database: database.into(),
            read_only: false,
            verbose: false,
            max_query_length: DEFAULT_MAX_QUERY_LENGTH,
            allow_unknown_tags: false,
        }
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Reads options from a JSON file. A relative `database` path is taken
    /// relative to the file's folder.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|error| {
            if error.kind() == std::io::ErrorKind::NotFound {
                FaunerieError::PathNotFound(path.to_path_buf())
            } else {
                FaunerieError::Io(error)
            }
        })?;
        let mut options: LibraryOptions = serde_json::from_str(&data)?;
        if options.database.is_relative() {
            if let Some(parent) = path.parent() {
                options.database = parent.join(&options.database);
            }
        }
        if options.max_query_length == 0 {
            return Err(FaunerieError::InvalidInput(
                "maxQueryLength must be positive".to_string(),
            ));
        }
        Ok(options)
    }

    pub fn database_file(&self) -> PathBuf {
        self.database.join(DATABASE_FILENAME)
    }

    pub fn marker_file(&self) -> PathBuf {
        self.database.join(INSTANCE_MARKER_FILENAME)
    }

    /// Checks that the folder exists and carries the instance marker.
    pub fn validate(&self) -> Result<()> {
        if !self.database.is_dir() {
            return Err(FaunerieError::PathNotFound(self.database.clone()));
        }
        if !self.marker_file().is_file() {
            return Err(FaunerieError::InvalidInput(format!(
                "{} is not a library folder (missing {INSTANCE_MARKER_FILENAME})",
                self.database.display()
            )));
        }
        Ok(())
    }
}
