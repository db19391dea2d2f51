//! Persistent key/value slot.
//!
//! The slot plays the role of browser local storage: a flat map of string
//! keys to JSON-encoded string values that survives restarts of the front
//! end. Reads are forgiving. A value that fails to parse is treated as
//! absent and the caller falls back to its default.
//!
//! # Backends
//!
//! - [`MemorySlot`] - In-process map, used by tests
//! - [`FileSlot`] - Single JSON file on disk, used by the terminal front end

mod file;
mod memory;

pub use file::FileSlot;
pub use memory::MemorySlot;

use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur when writing to a slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value could not be encoded as JSON.
    #[error("storage encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Slot keys used by the stores.
pub mod keys {
    /// `true` while a user is logged in.
    pub const LOGGED_IN: &str = "food3d_logged_in";

    /// Email of the logged-in user.
    pub const CURRENT_USER: &str = "food3d_current_user";

    /// Account directory (email to password).
    pub const USERS: &str = "food3d_users";

    /// Cart line list.
    pub const CART: &str = "food3d_cart";
}

/// A synchronous string key/value store.
pub trait KeyValueSlot {
    /// Returns the raw value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot persist the change.
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot persist the change.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Read and decode the JSON value stored under `key`.
///
/// Returns `None` if the key is absent or holds malformed JSON.
pub fn read_json<T: DeserializeOwned>(slot: &impl KeyValueSlot, key: &str) -> Option<T> {
    let raw = slot.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding malformed storage value");
            None
        }
    }
}

/// Encode `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns `StorageError` if encoding fails or the backend cannot persist.
pub fn write_json<T: Serialize + ?Sized>(
    slot: &mut impl KeyValueSlot,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    slot.set(key, raw)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_read_json_absent_key() {
        let slot = MemorySlot::new();
        assert_eq!(read_json::<Vec<u32>>(&slot, keys::CART), None);
    }

    #[test]
    fn test_read_json_malformed_is_absent() {
        let slot = MemorySlot::new().with_entry(keys::CART, "[1, 2,");
        assert_eq!(read_json::<Vec<u32>>(&slot, keys::CART), None);
    }

    #[test]
    fn test_read_json_wrong_shape_is_absent() {
        let slot = MemorySlot::new().with_entry(keys::CART, "{\"not\": \"a list\"}");
        assert_eq!(read_json::<Vec<u32>>(&slot, keys::CART), None);
    }

    #[test]
    fn test_write_then_read() {
        let mut slot = MemorySlot::new();
        write_json(&mut slot, keys::CART, &vec![1_u32, 2, 3]).unwrap();
        assert_eq!(slot.get(keys::CART).as_deref(), Some("[1,2,3]"));
        assert_eq!(read_json::<Vec<u32>>(&slot, keys::CART), Some(vec![1, 2, 3]));
    }
}
