//! End-to-end test support for Food3D.
//!
//! [`TestServer`] runs the real router on an ephemeral port with a temporary
//! public directory, so tests exercise routing, static files and middleware
//! over actual HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p food3d-integration-tests
//! ```

#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::path::Path;

use axum::Router;
use tempfile::TempDir;
use url::Url;

use food3d_core::{MenuItem, MenuItemId, Price};
use food3d_server::state::AppState;

/// Body of the test `auth.html`.
pub const AUTH_PAGE: &str = "<!DOCTYPE html><title>auth</title>";

/// Body of the test `index.html`.
pub const INDEX_PAGE: &str = "<!DOCTYPE html><title>menu</title>";

/// A running server with its own public directory.
pub struct TestServer {
    addr: SocketAddr,
    _public_dir: TempDir,
}

impl TestServer {
    /// Serve `menu` and a minimal public directory on `127.0.0.1:0`.
    pub async fn start(menu: Vec<MenuItem>) -> Self {
        let public_dir = tempfile::tempdir().expect("tempdir");
        write_public_files(public_dir.path());

        let state = AppState::new(menu, public_dir.path()).expect("valid menu");
        let addr = spawn(food3d_server::app(state)).await;

        Self {
            addr,
            _public_dir: public_dir,
        }
    }

    /// Base URL, e.g. `http://127.0.0.1:49152/`.
    #[must_use]
    pub fn base_url(&self) -> Url {
        base_url(self.addr)
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

/// Serve `router` on an ephemeral port and return its address.
pub async fn spawn(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, router).await.expect("serve app") });
    addr
}

/// `http://{addr}/`.
#[must_use]
pub fn base_url(addr: SocketAddr) -> Url {
    Url::parse(&format!("http://{addr}/")).expect("valid url")
}

/// Three items across two categories.
#[must_use]
pub fn sample_menu() -> Vec<MenuItem> {
    vec![
        item(1, "Margherita", "12.99", "pizza"),
        item(2, "Cheeseburger", "9.50", "burger"),
        item(3, "Pepperoni", "14.00", "pizza"),
    ]
}

/// Build a menu item with an empty description.
#[must_use]
pub fn item(id: i32, name: &str, price: &str, category: &str) -> MenuItem {
    MenuItem {
        id: MenuItemId::new(id),
        name: name.to_string(),
        description: String::new(),
        price: Price::parse(price).expect("valid price"),
        category: category.to_string(),
        image: None,
    }
}

fn write_public_files(dir: &Path) {
    std::fs::write(dir.join("auth.html"), AUTH_PAGE).expect("write auth.html");
    std::fs::write(dir.join("index.html"), INDEX_PAGE).expect("write index.html");
    std::fs::create_dir_all(dir.join("js")).expect("create js dir");
    std::fs::write(dir.join("js/main.js"), "console.log('food3d');").expect("write main.js");
}
