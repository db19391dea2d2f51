//! The app controller driving a real server over HTTP.

use axum::{Router, http::StatusCode, routing::get};
use food3d_app::storage::keys;
use food3d_app::view::{MenuStatus, MenuView};
use food3d_app::{
    CatalogError, Command, Controller, FileSlot, HttpMenuSource, KeyValueSlot, MemorySlot,
    MenuSource, Notice, Screen, Store, Ui, ViewState,
};
use food3d_core::{CategoryFilter, MenuItemId};
use food3d_integration_tests::{TestServer, base_url, sample_menu, spawn};

#[derive(Default)]
struct RecordingUi {
    renders: Vec<ViewState>,
    notices: Vec<Notice>,
}

impl RecordingUi {
    fn last_menu(&self) -> &MenuView {
        match &self.renders.last().expect("rendered").screen {
            Screen::Menu(menu) => menu,
            Screen::Auth(_) => panic!("expected menu screen"),
        }
    }
}

impl Ui for RecordingUi {
    fn render(&mut self, state: &ViewState) {
        self.renders.push(state.clone());
    }

    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }
}

fn credentials() -> (String, String) {
    ("diner@example.com".to_string(), "pa55".to_string())
}

async fn sign_in<S: KeyValueSlot, M: MenuSource>(controller: &mut Controller<S, M, RecordingUi>) {
    let (email, password) = credentials();
    controller
        .dispatch(Command::Register {
            email: email.clone(),
            password: password.clone(),
        })
        .await;
    controller.dispatch(Command::Login { email, password }).await;
}

#[tokio::test]
async fn test_http_menu_source_fetches_menu() {
    let server = TestServer::start(sample_menu()).await;
    let source = HttpMenuSource::new(&server.base_url()).expect("client");

    let items = source.fetch_menu().await.expect("menu");
    assert_eq!(items, sample_menu());
}

#[tokio::test]
async fn test_login_browse_and_checkout() {
    let server = TestServer::start(sample_menu()).await;
    let source = HttpMenuSource::new(&server.base_url()).expect("client");
    let mut controller = Controller::new(
        Store::load(MemorySlot::new()),
        source,
        RecordingUi::default(),
    );

    sign_in(&mut controller).await;
    let menu = controller.ui().last_menu();
    assert_eq!(menu.status, MenuStatus::Ready);
    assert_eq!(menu.categories, vec!["pizza", "burger"]);

    controller
        .dispatch(Command::SelectCategory(CategoryFilter::parse("pizza")))
        .await;
    assert_eq!(controller.ui().last_menu().items.len(), 2);

    controller.dispatch(Command::AddToCart(MenuItemId::new(1))).await;
    controller.dispatch(Command::AddToCart(MenuItemId::new(1))).await;
    controller.dispatch(Command::AddToCart(MenuItemId::new(2))).await;
    assert_eq!(controller.ui().last_menu().cart.total, "35.48");

    controller.dispatch(Command::PlaceOrder).await;
    assert_eq!(
        controller.ui().notices.last().expect("notice"),
        &Notice::success("Order placed successfully! Total amount: 35.48")
    );
    assert_eq!(controller.ui().last_menu().cart.count, 0);
}

#[tokio::test]
async fn test_server_error_shows_message_and_empties_catalog() {
    let router = Router::new().route(
        "/api/menu",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let addr = spawn(router).await;
    let source = HttpMenuSource::new(&base_url(addr)).expect("client");

    let err = source.fetch_menu().await.expect_err("should fail");
    assert!(matches!(err, CatalogError::Status(500)));

    let mut controller = Controller::new(
        Store::load(MemorySlot::new()),
        source,
        RecordingUi::default(),
    );
    sign_in(&mut controller).await;

    let menu = controller.ui().last_menu();
    assert_eq!(
        menu.status,
        MenuStatus::Failed("Error loading menu: HTTP error! Status: 500".to_string())
    );
    assert!(menu.items.is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_a_load_failure() {
    let router = Router::new().route("/api/menu", get(|| async { "not json" }));
    let addr = spawn(router).await;
    let source = HttpMenuSource::new(&base_url(addr)).expect("client");

    let err = source.fetch_menu().await.expect_err("should fail");
    assert!(matches!(err, CatalogError::Parse(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let source = HttpMenuSource::new(&base_url(addr)).expect("client");
    let err = source.fetch_menu().await.expect_err("should fail");
    assert!(matches!(err, CatalogError::Http(_)));
}

#[tokio::test]
async fn test_state_survives_restart_with_file_slot() {
    let server = TestServer::start(sample_menu()).await;
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("state/storage.json");

    {
        let slot = FileSlot::open(&path).expect("open slot");
        let source = HttpMenuSource::new(&server.base_url()).expect("client");
        let mut controller =
            Controller::new(Store::load(slot), source, RecordingUi::default());
        sign_in(&mut controller).await;
        controller.dispatch(Command::AddToCart(MenuItemId::new(3))).await;
    }

    let slot = FileSlot::open(&path).expect("reopen slot");
    assert_eq!(slot.get(keys::LOGGED_IN).as_deref(), Some("true"));

    let source = HttpMenuSource::new(&server.base_url()).expect("client");
    let mut controller = Controller::new(Store::load(slot), source, RecordingUi::default());
    controller.start().await;

    let menu = controller.ui().last_menu();
    assert_eq!(menu.user, "diner@example.com");
    assert_eq!(menu.items.len(), 3);
    assert_eq!(menu.cart.count, 1);
    assert_eq!(menu.cart.total, "14.00");
}
