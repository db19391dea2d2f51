//! Food3D Server binary.
//!
//! Serves the static front end and `GET /api/menu` on port 5000.

#![cfg_attr(not(test), forbid(unsafe_code))]

use food3d_server::config::ServerConfig;
use food3d_server::menu::load_menu;
use food3d_server::state::AppState;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Start the Sentry client when `SENTRY_DSN` is configured.
///
/// The returned guard flushes queued 5xx reports when `main` returns.
fn init_sentry(config: &ServerConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_deref()?;

    let options = sentry::ClientOptions {
        release: sentry::release_name!(),
        environment: config.sentry_environment.clone().map(Into::into),
        sample_rate: config.sentry_sample_rate,
        traces_sample_rate: config.sentry_traces_sample_rate,
        attach_stacktrace: true,
        ..Default::default()
    };
    Some(sentry::init((dsn, options)))
}

/// Warnings and errors become Sentry events; request and menu logs below
/// that ride along as breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    let level = *metadata.level();
    if level <= tracing::Level::WARN {
        sentry_tracing::EventFilter::Event
    } else if level <= tracing::Level::DEBUG {
        sentry_tracing::EventFilter::Breadcrumb
    } else {
        sentry_tracing::EventFilter::Ignore
    }
}

#[tokio::main]
async fn main() {
    let config = ServerConfig::from_env().expect("Failed to load configuration");
    // Before the subscriber, so the sentry layer has a client to report to.
    let sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "food3d_server=info,tower_http=debug".into());

    // JSON logs when FOOD3D_LOG_JSON is set, text otherwise
    let json_logs = std::env::var("FOOD3D_LOG_JSON").is_ok();
    let json_layer =
        json_logs.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!json_logs).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
    if sentry_guard.is_some() {
        tracing::info!("Sentry error reporting enabled");
    }

    let menu = load_menu(&config.menu_path).expect("Failed to load menu");
    let state = AppState::new(menu, &config.public_dir)
        .expect("Failed to initialize application state");

    let app = food3d_server::app(state)
        // Outermost, so each request gets its own hub and transaction.
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let addr = config.socket_addr();
    tracing::info!(public_dir = %config.public_dir.display(), "food3d listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
    drop(sentry_guard);
}

/// Resolves on Ctrl+C, or SIGTERM on unix, so in-flight menu and static
/// requests finish before the listener closes.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => tracing::info!("Ctrl+C received, draining connections"),
        () = terminate => tracing::info!("SIGTERM received, draining connections"),
    }
}
