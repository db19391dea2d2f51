//! File-backed slot.
//!
//! All keys live in one JSON object file. Every mutation rewrites the file
//! through a sibling temp file and a rename, so a crash mid-write leaves the
//! previous contents in place.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{KeyValueSlot, StorageError};

/// Slot persisted to a JSON file of `{ key: value }` strings.
#[derive(Debug)]
pub struct FileSlot {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileSlot {
    /// Open the slot at `path`.
    ///
    /// A missing file opens as an empty slot. A file that is not a JSON
    /// object of strings is discarded with a warning and also opens empty;
    /// it is overwritten on the next write.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        let entries = match fs::read_to_string(&path) {
            Ok(contents) => parse_entries(&path, &contents),
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        tracing::debug!(path = %path.display(), keys = entries.len(), "Opened storage file");
        Ok(Self { path, entries })
    }

    fn flush(&self) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let contents = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, contents).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)
    }
}

fn parse_entries(path: &Path, contents: &str) -> BTreeMap<String, String> {
    if contents.trim().is_empty() {
        return BTreeMap::new();
    }
    serde_json::from_str(contents).unwrap_or_else(|e| {
        tracing::warn!(
            path = %path.display(),
            error = %e,
            "Storage file is malformed, starting empty"
        );
        BTreeMap::new()
    })
}

impl KeyValueSlot for FileSlot {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}
