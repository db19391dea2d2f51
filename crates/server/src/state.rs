//! Application state shared across handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use food3d_core::{MenuItem, MenuItemId};

use crate::menu::{MenuError, validate};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The menu is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    menu: Vec<MenuItem>,
    public_dir: PathBuf,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns `MenuError::DuplicateId` if `menu` repeats an id.
    pub fn new(menu: Vec<MenuItem>, public_dir: impl Into<PathBuf>) -> Result<Self, MenuError> {
        validate(&menu)?;
        Ok(Self {
            inner: Arc::new(AppStateInner {
                menu,
                public_dir: public_dir.into(),
            }),
        })
    }

    /// The full menu in file order.
    #[must_use]
    pub fn menu(&self) -> &[MenuItem] {
        &self.inner.menu
    }

    /// Look up a menu item by id.
    #[must_use]
    pub fn menu_item(&self, id: MenuItemId) -> Option<&MenuItem> {
        self.inner.menu.iter().find(|item| item.id == id)
    }

    /// Root directory for static files.
    #[must_use]
    pub fn public_dir(&self) -> &Path {
        &self.inner.public_dir
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("menu_items", &self.inner.menu.len())
            .field("public_dir", &self.inner.public_dir)
            .finish()
    }
}
