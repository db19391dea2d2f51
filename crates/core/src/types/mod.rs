//! Core types for Food3D.
//!
//! This module provides type-safe wrappers for the demo's domain concepts.

pub mod account;
pub mod cart;
pub mod email;
pub mod id;
pub mod menu;
pub mod price;

pub use account::{Account, Session};
pub use cart::CartLine;
pub use email::{Email, EmailError};
pub use id::MenuItemId;
pub use menu::{CategoryFilter, MenuItem};
pub use price::{Price, PriceError};
