//! Flat-file content store
//!
//! Both archives (monthly index pages and individual posts) are plain
//! directories mapping a string key to one file holding the raw response
//! body. Entries are written once on first successful retrieval and never
//! mutated or deleted afterwards, which is what makes the whole pipeline
//! safely resumable: re-running skips every key that is already present.

use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by the content store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store directory not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid store key: {0:?}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// A flat key -> file mapping rooted at one directory
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    /// Opens an existing store, failing if the directory does not exist.
    ///
    /// Analysis uses this: running it without a prior archive run is an
    /// error, not an empty result.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(StoreError::NotFound(root));
        }
        Ok(Self { root })
    }

    /// Opens the store, creating the directory (and parents) if absent.
    pub fn create(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The directory this store is rooted at
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns true if the store already holds content for `key`
    pub fn contains(&self, key: &str) -> bool {
        match Self::entry_path(&self.root, key) {
            Ok(path) => path.is_file(),
            Err(_) => false,
        }
    }

    /// Writes the content for `key`.
    ///
    /// The pipeline only calls this for absent keys; overwriting is not an
    /// error at this level but nothing in the crate does it.
    pub fn write(&self, key: &str, content: &[u8]) -> StoreResult<()> {
        let path = Self::entry_path(&self.root, key)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Reads the raw content stored for `key`
    pub fn read(&self, key: &str) -> StoreResult<Vec<u8>> {
        let path = Self::entry_path(&self.root, key)?;
        Ok(fs::read(path)?)
    }

    /// Returns the modification time of the entry for `key`.
    ///
    /// This is the pipeline's stand-in for the post's publish time. It is a
    /// documented approximation: the true publish time is not recoverable
    /// from the fetched pages, and entries from early months carry times
    /// that do not reflect the original local posting time.
    pub fn modified(&self, key: &str) -> StoreResult<DateTime<Local>> {
        let path = Self::entry_path(&self.root, key)?;
        let meta = fs::metadata(path)?;
        Ok(DateTime::from(meta.modified()?))
    }

    /// Lists all keys in the store, sorted lexically
    pub fn keys(&self) -> StoreResult<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                if let Some(name) = entry.file_name().to_str() {
                    keys.push(name.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn entry_path(root: &Path, key: &str) -> StoreResult<PathBuf> {
        if key.is_empty() || key.contains('/') || key.contains('\\') || key == "." || key == ".." {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(root.join(key))
    }
}
