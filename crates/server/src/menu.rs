//! Menu data file.
//!
//! The menu is a JSON array of [`MenuItem`]s read once at startup. Item ids
//! must be unique; the cart keys lines by id.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;

use food3d_core::{MenuItem, MenuItemId};

/// Errors that can occur when loading the menu file.
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("failed to read menu file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse menu file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate menu item id {0}")]
    DuplicateId(MenuItemId),
}

/// Read and validate the menu file at `path`.
///
/// # Errors
///
/// Returns `MenuError` if the file cannot be read, is not a JSON array of
/// menu items, or repeats an id.
pub fn load_menu(path: &Path) -> Result<Vec<MenuItem>, MenuError> {
    let bytes = std::fs::read(path).map_err(|source| MenuError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let items: Vec<MenuItem> =
        serde_json::from_slice(&bytes).map_err(|source| MenuError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    validate(&items)?;
    tracing::info!(path = %path.display(), count = items.len(), "Menu loaded");
    Ok(items)
}

/// Check that every item id is unique.
///
/// # Errors
///
/// Returns `MenuError::DuplicateId` for the first repeated id.
pub fn validate(items: &[MenuItem]) -> Result<(), MenuError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id) {
            return Err(MenuError::DuplicateId(item.id));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_menu(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_menu_coerces_prices() {
        let file = write_menu(
            r#"[
                {"id": 1, "name": "Pizza", "description": "Cheesy", "price": 12.99, "category": "pizza", "image": "pizza.png"},
                {"id": 2, "name": "Soda", "price": "1.5", "category": "drinks"}
            ]"#,
        );
        let items = load_menu(file.path()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].price.to_string(), "12.99");
        assert_eq!(items[1].price.to_string(), "1.50");
        assert_eq!(items[1].description, "");
        assert!(items[1].image.is_none());
    }

    #[test]
    fn test_load_menu_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_menu(&dir.path().join("menu.json")).unwrap_err();
        assert!(matches!(err, MenuError::Read { .. }));
    }

    #[test]
    fn test_load_menu_malformed() {
        let file = write_menu(r#"{"id": 1}"#);
        let err = load_menu(file.path()).unwrap_err();
        assert!(matches!(err, MenuError::Parse { .. }));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let file = write_menu(
            r#"[
                {"id": 1, "name": "A", "price": 1, "category": "x"},
                {"id": 1, "name": "B", "price": 2, "category": "y"}
            ]"#,
        );
        let err = load_menu(file.path()).unwrap_err();
        assert_eq!(err.to_string(), "duplicate menu item id 1");
    }

    #[test]
    fn test_bundled_menu_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/menu.json");
        let items = load_menu(&path).unwrap();
        assert!(!items.is_empty());
    }
}
