//! Food3D App - Client-side state and view controller.
//!
//! Everything the front end does short of drawing pixels: the persistent
//! key/value slot, the cart, account directory and catalog stores, the menu
//! loader, and a [`Controller`] that turns [`Command`]s into renders through
//! the [`Ui`] trait.
//!
//! # Modules
//!
//! - [`config`] - Environment configuration (API URL, slot file path)
//! - [`storage`] - Key/value slot trait with memory and file backends
//! - [`store`] - Cart, accounts, session and catalog state
//! - [`menu_source`] - `GET /api/menu` client
//! - [`view`] - View models, the `Ui` trait and the controller

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod menu_source;
pub mod storage;
pub mod store;
pub mod view;

pub use config::{AppConfig, ConfigError};
pub use menu_source::{CatalogError, HttpMenuSource, MenuSource};
pub use storage::{FileSlot, KeyValueSlot, MemorySlot, StorageError};
pub use store::{AuthError, OrderReceipt, Store};
pub use view::{Command, Controller, Notice, NoticeLevel, Screen, Ui, ViewState};
