//! Command dispatch.
//!
//! The [`Controller`] is the composition root: it owns the [`Store`], the
//! menu source and the UI. Front ends translate user input into
//! [`Command`]s and the controller applies them, then re-renders.

use food3d_core::{CategoryFilter, MenuItemId};

use crate::menu_source::MenuSource;
use crate::storage::KeyValueSlot;
use crate::store::{AuthError, FetchOutcome, Store};

use super::{
    AuthForm, AuthView, CartView, MenuItemView, MenuStatus, MenuView, Notice, Screen, Ui,
    ViewState,
};

/// A user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ShowLogin,
    ShowSignUp,
    Login { email: String, password: String },
    Register { email: String, password: String },
    Logout,
    SelectCategory(CategoryFilter),
    AddToCart(MenuItemId),
    ChangeQuantity { id: MenuItemId, delta: i64 },
    OpenCart,
    CloseCart,
    PlaceOrder,
    ReloadMenu,
}

/// Applies commands to the store and drives the UI.
#[derive(Debug)]
pub struct Controller<S, M, U> {
    store: Store<S>,
    source: M,
    ui: U,
    auth_form: AuthForm,
    email_prefill: Option<String>,
    category: CategoryFilter,
    cart_open: bool,
}

impl<S, M, U> Controller<S, M, U>
where
    S: KeyValueSlot,
    M: MenuSource,
    U: Ui,
{
    #[must_use]
    pub fn new(store: Store<S>, source: M, ui: U) -> Self {
        Self {
            store,
            source,
            ui,
            auth_form: AuthForm::Login,
            email_prefill: None,
            category: CategoryFilter::All,
            cart_open: false,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &Store<S> {
        &self.store
    }

    #[must_use]
    pub const fn ui(&self) -> &U {
        &self.ui
    }

    #[must_use]
    pub const fn active_category(&self) -> &CategoryFilter {
        &self.category
    }

    /// Tear down into the store and UI.
    pub fn into_parts(self) -> (Store<S>, U) {
        (self.store, self.ui)
    }

    /// First render. A persisted session goes straight to the menu.
    pub async fn start(&mut self) {
        if self.logged_in() {
            self.load_menu().await;
        } else {
            self.render();
        }
    }

    /// Render the current state without fetching anything.
    pub fn refresh(&mut self) {
        self.render();
    }

    /// Apply one command.
    #[tracing::instrument(skip(self, command), fields(command = command.name()))]
    pub async fn dispatch(&mut self, command: Command) {
        if command.requires_session() && !self.logged_in() {
            tracing::debug!("Ignoring command while logged out");
            return;
        }

        match command {
            Command::ShowLogin => self.show_form(AuthForm::Login),
            Command::ShowSignUp => self.show_form(AuthForm::SignUp),
            Command::Register { email, password } => self.register(&email, &password),
            Command::Login { email, password } => self.login(&email, &password).await,
            Command::Logout => {
                self.store.logout();
                self.auth_form = AuthForm::Login;
                self.email_prefill = None;
                self.category = CategoryFilter::All;
                self.cart_open = false;
                self.render();
            }
            Command::SelectCategory(filter) => {
                self.category = filter;
                self.render();
            }
            Command::AddToCart(id) => {
                if self.store.add_to_cart(id) {
                    self.render();
                }
            }
            Command::ChangeQuantity { id, delta } => {
                if self.store.change_quantity(id, delta) {
                    self.render();
                }
            }
            Command::OpenCart => {
                self.cart_open = true;
                self.render();
            }
            Command::CloseCart => {
                self.cart_open = false;
                self.render();
            }
            Command::PlaceOrder => self.place_order(),
            Command::ReloadMenu => self.load_menu().await,
        }
    }

    /// Current view.
    #[must_use]
    pub fn view_state(&self) -> ViewState {
        let session = self.store.session();
        let screen = match session.current_user() {
            None => Screen::Auth(AuthView {
                form: self.auth_form,
                email_prefill: self.email_prefill.clone(),
            }),
            Some(user) => {
                let catalog = self.store.catalog();
                Screen::Menu(MenuView {
                    user: user.to_string(),
                    status: MenuStatus::from_catalog(catalog.status()),
                    categories: catalog.categories().into_iter().map(str::to_owned).collect(),
                    active_category: self.category.clone(),
                    items: catalog
                        .filter(&self.category)
                        .into_iter()
                        .map(MenuItemView::from)
                        .collect(),
                    cart: CartView::from(self.store.cart()),
                    cart_open: self.cart_open,
                })
            }
        };
        ViewState { screen }
    }

    fn logged_in(&self) -> bool {
        self.store.session().is_active()
    }

    fn render(&mut self) {
        let state = self.view_state();
        self.ui.render(&state);
    }

    fn show_form(&mut self, form: AuthForm) {
        if self.logged_in() {
            return;
        }
        self.auth_form = form;
        self.render();
    }

    fn register(&mut self, email: &str, password: &str) {
        match self.store.register(email, password) {
            Ok(email) => {
                self.auth_form = AuthForm::Login;
                self.email_prefill = Some(email.into_inner());
                self.render();
                self.ui
                    .notify(&Notice::success("Sign up successful! Please log in."));
            }
            Err(e) => self.ui.notify(&auth_notice(&e)),
        }
    }

    async fn login(&mut self, email: &str, password: &str) {
        match self.store.login(email, password) {
            Ok(_) => {
                self.email_prefill = None;
                self.cart_open = false;
                self.load_menu().await;
            }
            Err(e) => self.ui.notify(&auth_notice(&e)),
        }
    }

    fn place_order(&mut self) {
        match self.store.checkout() {
            None => self.ui.notify(&Notice::error(
                "Your cart is empty. Please add some food items!",
            )),
            Some(receipt) => {
                self.cart_open = false;
                self.render();
                self.ui.notify(&Notice::success(format!(
                    "Order placed successfully! Total amount: {}",
                    receipt.total
                )));
            }
        }
    }

    async fn load_menu(&mut self) {
        let ticket = self.store.begin_catalog_fetch();
        self.render();

        let result = self.source.fetch_menu().await;
        match self.store.finish_catalog_fetch(ticket, result) {
            FetchOutcome::Applied(count) => {
                tracing::info!(count, "Menu loaded");
                self.category = CategoryFilter::All;
                self.render();
            }
            FetchOutcome::Failed => self.render(),
            FetchOutcome::Stale => {}
        }
    }
}

impl Command {
    /// Short name for logging. Never includes credentials.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ShowLogin => "show_login",
            Self::ShowSignUp => "show_sign_up",
            Self::Login { .. } => "login",
            Self::Register { .. } => "register",
            Self::Logout => "logout",
            Self::SelectCategory(_) => "select_category",
            Self::AddToCart(_) => "add_to_cart",
            Self::ChangeQuantity { .. } => "change_quantity",
            Self::OpenCart => "open_cart",
            Self::CloseCart => "close_cart",
            Self::PlaceOrder => "place_order",
            Self::ReloadMenu => "reload_menu",
        }
    }

    const fn requires_session(&self) -> bool {
        !matches!(
            self,
            Self::ShowLogin | Self::ShowSignUp | Self::Login { .. } | Self::Register { .. }
        )
    }
}

fn auth_notice(error: &AuthError) -> Notice {
    let message = match error {
        AuthError::InvalidEmail(e) => format!("Invalid email address: {e}"),
        AuthError::UserAlreadyExists => "User already exists! Please log in.".to_string(),
        AuthError::UserNotFound => "User not found. Please sign up.".to_string(),
        AuthError::IncorrectPassword => "Incorrect password.".to_string(),
    };
    Notice::error(message)
}
