//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - auth.html
//! GET  /health            - Health check
//! GET  /api/menu          - Full menu (JSON array)
//! GET  /api/menu/{id}     - Single menu item
//! GET  /*                 - Static files from the public directory
//! ```

pub mod api;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the menu API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/menu", get(api::menu))
        .route("/menu/{id}", get(api::menu_item))
}

/// Liveness health check endpoint.
pub async fn health() -> &'static str {
    "ok"
}
