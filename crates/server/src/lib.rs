//! Food3D Server - Static front end and menu API.
//!
//! Serves the front end's static files and exposes the menu as JSON. The
//! menu is loaded once at startup and shared immutably across requests; the
//! server keeps no per-user state.
//!
//! # Modules
//!
//! - [`config`] - Environment configuration
//! - [`menu`] - Menu file loading and validation
//! - [`routes`] - API handlers
//! - [`middleware`] - Request ID and security headers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod menu;
pub mod middleware;
pub mod routes;
pub mod state;

use std::time::Duration;

use axum::{
    Router,
    handler::HandlerWithoutStateExt,
    http::{Method, Request, Response},
    middleware::from_fn,
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::error::AppError;
use crate::state::AppState;

/// Page served for `/`.
pub const ENTRY_PAGE: &str = "auth.html";

/// Build the full application router.
///
/// `/` resolves to [`ENTRY_PAGE`]; every path outside `/api` and `/health`
/// is looked up in the public directory, with a plain 404 for misses.
pub fn app(state: AppState) -> Router {
    let public_dir = state.public_dir().to_path_buf();
    let static_files =
        ServeDir::new(&public_dir).not_found_service(not_found.into_service());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .route("/health", get(routes::health))
        .route_service("/", ServeFile::new(public_dir.join(ENTRY_PAGE)))
        .nest("/api", routes::api_routes().layer(cors))
        .fallback_service(static_files)
        .layer(from_fn(middleware::security_headers_middleware))
        .layer(from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(|response: &Response<_>, latency: Duration, span: &Span| {
                    span.record("status", response.status().as_u16());
                    span.record(
                        "latency_ms",
                        u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                    );
                    DefaultOnResponse::default().on_response(response, latency, span);
                }),
        )
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound("file".to_string())
}
