//! Persistence for the committed query state
//!
//! The session treats this state the way a browser treats its address
//! bar: every change is mirrored out immediately, and the next run picks
//! up exactly where the last one left off. Reads and writes go through
//! the `QueryStateStore` abstraction: a file-backed store under the
//! user's data directory for normal runs, and an in-memory store for
//! tests and `--ephemeral` sessions.
//!
//! Writes have replace semantics; there is no history.

use super::QueryState;
use std::fs;
use std::path::PathBuf;

/// Errors from reading or writing the view state
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O failure on the backing file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The state location could not be resolved
    #[error("Could not determine data directory")]
    NoDataDir,
}

/// Read/write access to the committed query state
///
/// `read` yields the last written state (or the default when nothing has
/// been written); `write` replaces it wholesale.
pub trait QueryStateStore {
    /// Read the current state
    ///
    /// # Errors
    /// Returns `StoreError` if the backing storage cannot be read.
    fn read(&self) -> Result<QueryState, StoreError>;

    /// Replace the stored state
    ///
    /// # Errors
    /// Returns `StoreError` if the backing storage cannot be written.
    fn write(&mut self, state: &QueryState) -> Result<(), StoreError>;
}

/// File-backed store holding the canonical query string
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store over an explicit file path
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Create a store at the default location in the user's data directory
    ///
    /// # Errors
    /// Returns `StoreError::NoDataDir` if the system data directory cannot
    /// be determined.
    pub fn default_location() -> Result<Self, StoreError> {
        let data_dir = dirs::data_local_dir().ok_or(StoreError::NoDataDir)?;
        Ok(Self::new(data_dir.join("vitrin").join("view_state")))
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl QueryStateStore for FileStore {
    fn read(&self) -> Result<QueryState, StoreError> {
        if !self.path.exists() {
            return Ok(QueryState::default());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(QueryState::parse(contents.trim()))
    }

    fn write(&mut self, state: &QueryState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, state.to_query_string())?;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    current: QueryState,
}

impl MemoryStore {
    /// Create an empty in-memory store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a state
    #[must_use]
    pub const fn seeded(state: QueryState) -> Self {
        Self { current: state }
    }

    /// The most recently written state
    #[must_use]
    pub const fn current(&self) -> &QueryState {
        &self.current
    }
}

impl QueryStateStore for MemoryStore {
    fn read(&self) -> Result<QueryState, StoreError> {
        Ok(self.current.clone())
    }

    fn write(&mut self, state: &QueryState) -> Result<(), StoreError> {
        self.current = state.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("view_state"));

        let state = QueryState {
            search: "lamp".to_string(),
            page: 3,
            brands: BTreeSet::from([5, 9]),
            categories: BTreeSet::from([2]),
        };

        store.write(&state).unwrap();
        assert_eq!(store.read().unwrap(), state);
    }

    #[test]
    fn test_file_store_missing_file_reads_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("never_written"));
        assert_eq!(store.read().unwrap(), QueryState::default());
    }

    #[test]
    fn test_file_store_write_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("view_state"));

        let first = QueryState {
            search: "lamp".to_string(),
            ..QueryState::default()
        };
        store.write(&first).unwrap();
        store.write(&QueryState::default()).unwrap();

        assert_eq!(store.read().unwrap(), QueryState::default());
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        let state = QueryState {
            page: 1,
            ..QueryState::default()
        };

        store.write(&state).unwrap();
        assert_eq!(store.read().unwrap(), state);
        assert_eq!(store.current(), &state);
    }
}
