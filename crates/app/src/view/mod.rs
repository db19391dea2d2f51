//! View models and the UI seam.
//!
//! A front end implements [`Ui`] and receives a complete [`ViewState`] on
//! every render. View models carry display-ready strings (prices already
//! formatted) so front ends never touch the stores directly.

mod controller;

pub use controller::{Command, Controller};

use food3d_core::{CartLine, CategoryFilter, MenuItem, MenuItemId};

use crate::store::{Cart, CatalogStatus};

/// Shown while a catalog fetch is in flight.
pub const LOADING_MESSAGE: &str = "Fetching menu from server...";

/// Something that can display the application.
pub trait Ui {
    /// Redraw the whole screen.
    fn render(&mut self, state: &ViewState);

    /// Show a blocking notice (an alert in a browser).
    fn notify(&mut self, notice: &Notice);
}

/// Everything a front end needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub screen: Screen,
}

/// Top-level screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Logged out: login or sign-up form.
    Auth(AuthView),
    /// Logged in: menu grid and cart.
    Menu(MenuView),
}

/// Which auth form is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthForm {
    #[default]
    Login,
    SignUp,
}

/// Auth screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthView {
    pub form: AuthForm,
    /// Email to pre-fill in the login form after a sign-up.
    pub email_prefill: Option<String>,
}

/// Menu area state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuStatus {
    Loading,
    Ready,
    /// Message shown in place of the grid.
    Failed(String),
}

impl MenuStatus {
    /// Map catalog load state to what the menu area shows.
    #[must_use]
    pub fn from_catalog(status: &CatalogStatus) -> Self {
        match status {
            CatalogStatus::Idle | CatalogStatus::Loading => Self::Loading,
            CatalogStatus::Loaded => Self::Ready,
            CatalogStatus::Failed(message) => Self::Failed(format!("Error loading menu: {message}")),
        }
    }
}

/// Menu screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuView {
    /// Email of the logged-in user.
    pub user: String,
    pub status: MenuStatus,
    /// Category filter values in first-seen order, excluding "all".
    pub categories: Vec<String>,
    pub active_category: CategoryFilter,
    /// Items passing the active filter.
    pub items: Vec<MenuItemView>,
    pub cart: CartView,
    /// Whether the cart panel is expanded.
    pub cart_open: bool,
}

/// A menu card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemView {
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub image: Option<String>,
}

impl From<&MenuItem> for MenuItemView {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.to_string(),
            category: item.category.clone(),
            image: item.image.clone(),
        }
    }
}

/// Cart panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    /// Formatted total, e.g. "10.00".
    pub total: String,
    /// Badge count: sum of quantities.
    pub count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            total: cart.total().to_string(),
            count: cart.count(),
        }
    }
}

/// A cart row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: MenuItemId,
    pub name: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id(),
            name: line.item.name.clone(),
            unit_price: line.unit_price().to_string(),
            quantity: line.quantity,
            line_total: line.line_total().to_string(),
        }
    }
}

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Error,
    Success,
}

/// A one-off message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use food3d_core::Price;

    use super::*;

    #[test]
    fn test_cart_view_formats_prices() {
        let item = MenuItem {
            id: MenuItemId::new(1),
            name: "Taco".to_string(),
            description: String::new(),
            price: Price::parse("2.5").unwrap(),
            category: "mexican".to_string(),
            image: None,
        };
        let mut cart = Cart::default();
        cart.add(&item);
        cart.add(&item);

        let view = CartView::from(&cart);
        assert_eq!(view.total, "5.00");
        assert_eq!(view.count, 2);
        assert_eq!(view.items[0].unit_price, "2.50");
        assert_eq!(view.items[0].line_total, "5.00");
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::from(&Cart::default());
        assert!(view.items.is_empty());
        assert_eq!(view.total, "0.00");
        assert_eq!(view.count, 0);
    }

    #[test]
    fn test_menu_status_from_catalog() {
        assert_eq!(MenuStatus::from_catalog(&CatalogStatus::Loading), MenuStatus::Loading);
        assert_eq!(MenuStatus::from_catalog(&CatalogStatus::Loaded), MenuStatus::Ready);
        assert_eq!(
            MenuStatus::from_catalog(&CatalogStatus::Failed("HTTP error! Status: 500".to_string())),
            MenuStatus::Failed("Error loading menu: HTTP error! Status: 500".to_string())
        );
    }
}
