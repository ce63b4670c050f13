//! Document persistence.
//!
//! Documents are built fully in memory and handed over as bytes in a single
//! write, so a failed write never leaves a partial document behind a
//! successful tally.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// A failed document write. Row-fatal for the row being persisted; prior
/// and subsequent rows are unaffected.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write {filename}: {source}")]
    Write {
        filename: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Accepts finished documents for persistence.
pub trait ObservationStore {
    fn write(&mut self, filename: &str, contents: &[u8]) -> Result<()>;
}

/// Writes each document as one file under a directory.
#[derive(Debug)]
pub struct DirectoryStore {
    dir: PathBuf,
}

impl DirectoryStore {
    /// The directory must already exist; callers create it up front so a
    /// missing output location fails the run before any row is processed.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ObservationStore for DirectoryStore {
    fn write(&mut self, filename: &str, contents: &[u8]) -> Result<()> {
        let path = self.dir.join(filename);
        std::fs::write(&path, contents).map_err(|source| StoreError::Write {
            filename: filename.to_string(),
            source,
        })
    }
}

/// Keeps documents in memory. Used by dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub files: BTreeMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ObservationStore for MemoryStore {
    fn write(&mut self, filename: &str, contents: &[u8]) -> Result<()> {
        self.files.insert(filename.to_string(), contents.to_vec());
        Ok(())
    }
}
