//! Food3D Core - Shared domain types.
//!
//! This crate provides the types used across all Food3D components:
//! - `server` - Static file server exposing the menu endpoint
//! - `app` - Client-side stores and view controller
//! - `cli` - Terminal front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! storage access, no HTTP clients. This keeps it lightweight and allows it
//! to be used on both sides of the `/api/menu` boundary.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices and emails, plus the menu,
//!   cart and account records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
