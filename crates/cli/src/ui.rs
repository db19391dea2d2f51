//! Plain-text front end.
//!
//! Renders are buffered: only the last [`ViewState`] of a run is printed,
//! once, in the section the command asked for. Notices are written as they
//! arrive.

use std::io::{self, Write};

use food3d_app::view::{AuthForm, AuthView, CartView, MenuStatus, MenuView, LOADING_MESSAGE};
use food3d_app::{Notice, NoticeLevel, Screen, Ui, ViewState};

/// Which part of the final frame to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Session and cart summary.
    Status,
    /// Category list and menu items.
    Menu,
    /// Cart lines and total.
    Cart,
}

/// `Ui` implementation writing to any `Write`.
pub struct TerminalUi<W> {
    out: W,
    last: Option<ViewState>,
    errors: usize,
    io_error: Option<io::Error>,
}

impl<W: Write> TerminalUi<W> {
    pub const fn new(out: W) -> Self {
        Self {
            out,
            last: None,
            errors: 0,
            io_error: None,
        }
    }

    /// Number of error notices shown so far.
    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.errors
    }

    /// Print the last rendered frame.
    ///
    /// # Errors
    ///
    /// Returns the first write error seen during the run, if any.
    pub fn finish(&mut self, section: Section) -> io::Result<()> {
        if let Some(e) = self.io_error.take() {
            return Err(e);
        }
        let Some(state) = self.last.take() else {
            return Ok(());
        };
        match (&state.screen, section) {
            (Screen::Auth(auth), _) => write_auth(&mut self.out, auth)?,
            (Screen::Menu(menu), Section::Status) => write_status(&mut self.out, menu)?,
            (Screen::Menu(menu), Section::Menu) => write_menu(&mut self.out, menu)?,
            (Screen::Menu(menu), Section::Cart) => write_cart(&mut self.out, &menu.cart)?,
        }
        self.out.flush()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Ui for TerminalUi<W> {
    fn render(&mut self, state: &ViewState) {
        self.last = Some(state.clone());
    }

    fn notify(&mut self, notice: &Notice) {
        let result = match notice.level {
            NoticeLevel::Error => {
                self.errors += 1;
                writeln!(self.out, "error: {}", notice.message)
            }
            NoticeLevel::Success => writeln!(self.out, "{}", notice.message),
        };
        if let Err(e) = result {
            self.io_error.get_or_insert(e);
        }
    }
}

fn write_auth(out: &mut impl Write, auth: &AuthView) -> io::Result<()> {
    match (&auth.email_prefill, auth.form) {
        (Some(email), _) => writeln!(out, "Log in with: food3d login --email {email}"),
        (None, AuthForm::SignUp) => writeln!(out, "Not logged in. Sign up with: food3d register"),
        (None, AuthForm::Login) => writeln!(
            out,
            "Not logged in. Run `food3d login` or `food3d register` first."
        ),
    }
}

fn write_status(out: &mut impl Write, menu: &MenuView) -> io::Result<()> {
    writeln!(out, "Logged in as {}", menu.user)?;
    writeln!(out, "Cart: {} item(s), ${}", menu.cart.count, menu.cart.total)
}

fn write_menu(out: &mut impl Write, menu: &MenuView) -> io::Result<()> {
    match &menu.status {
        MenuStatus::Loading => return writeln!(out, "{LOADING_MESSAGE}"),
        MenuStatus::Failed(message) => return writeln!(out, "{message}"),
        MenuStatus::Ready => {}
    }

    let active = menu.active_category.as_str();
    write!(out, "Categories:")?;
    for category in std::iter::once("all").chain(menu.categories.iter().map(String::as_str)) {
        let marker = if category == active { "*" } else { "" };
        write!(out, " {category}{marker}")?;
    }
    writeln!(out)?;

    if menu.items.is_empty() {
        writeln!(out, "No items in this category.")?;
    }
    for item in &menu.items {
        writeln!(
            out,
            "  [{}] {} - ${} ({})",
            item.id, item.name, item.price, item.category
        )?;
        if !item.description.is_empty() {
            writeln!(out, "      {}", item.description)?;
        }
    }
    writeln!(out, "Cart: {} item(s), ${}", menu.cart.count, menu.cart.total)
}

fn write_cart(out: &mut impl Write, cart: &CartView) -> io::Result<()> {
    if cart.items.is_empty() {
        return writeln!(out, "Your cart is empty.");
    }
    for line in &cart.items {
        writeln!(
            out,
            "  [{}] {} {} x ${} = ${}",
            line.id, line.name, line.quantity, line.unit_price, line.line_total
        )?;
    }
    writeln!(out, "Total: ${} ({} item(s))", cart.total, cart.count)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use food3d_app::view::{CartItemView, MenuItemView};
    use food3d_core::{CategoryFilter, MenuItemId};

    use super::*;

    fn menu_view(status: MenuStatus) -> MenuView {
        MenuView {
            user: "a@x.com".to_string(),
            status,
            categories: vec!["pizza".to_string(), "drinks".to_string()],
            active_category: CategoryFilter::parse("pizza"),
            items: vec![MenuItemView {
                id: MenuItemId::new(1),
                name: "Pizza".to_string(),
                description: "Cheesy".to_string(),
                price: "12.99".to_string(),
                category: "pizza".to_string(),
                image: None,
            }],
            cart: CartView {
                items: vec![CartItemView {
                    id: MenuItemId::new(1),
                    name: "Pizza".to_string(),
                    unit_price: "12.99".to_string(),
                    quantity: 2,
                    line_total: "25.98".to_string(),
                }],
                total: "25.98".to_string(),
                count: 2,
            },
            cart_open: false,
        }
    }

    fn output(ui: TerminalUi<Vec<u8>>) -> String {
        String::from_utf8(ui.into_inner()).unwrap()
    }

    #[test]
    fn test_only_last_frame_is_printed() {
        let mut ui = TerminalUi::new(Vec::new());
        ui.render(&ViewState {
            screen: Screen::Menu(menu_view(MenuStatus::Loading)),
        });
        ui.render(&ViewState {
            screen: Screen::Menu(menu_view(MenuStatus::Ready)),
        });
        ui.finish(Section::Menu).unwrap();

        let out = output(ui);
        assert!(!out.contains(LOADING_MESSAGE));
        assert!(out.contains("Categories: all pizza* drinks"));
        assert!(out.contains("[1] Pizza - $12.99 (pizza)"));
        assert!(out.contains("Cart: 2 item(s), $25.98"));
    }

    #[test]
    fn test_failed_menu_shows_message() {
        let mut ui = TerminalUi::new(Vec::new());
        ui.render(&ViewState {
            screen: Screen::Menu(menu_view(MenuStatus::Failed(
                "Error loading menu: HTTP error! Status: 500".to_string(),
            ))),
        });
        ui.finish(Section::Menu).unwrap();
        assert_eq!(output(ui), "Error loading menu: HTTP error! Status: 500\n");
    }

    #[test]
    fn test_cart_section() {
        let mut ui = TerminalUi::new(Vec::new());
        ui.render(&ViewState {
            screen: Screen::Menu(menu_view(MenuStatus::Ready)),
        });
        ui.finish(Section::Cart).unwrap();
        assert_eq!(
            output(ui),
            "  [1] Pizza 2 x $12.99 = $25.98\nTotal: $25.98 (2 item(s))\n"
        );
    }

    #[test]
    fn test_notices_counted() {
        let mut ui = TerminalUi::new(Vec::new());
        ui.notify(&Notice::error("Incorrect password."));
        ui.notify(&Notice::success("Sign up successful! Please log in."));
        assert_eq!(ui.error_count(), 1);
        assert_eq!(
            output(ui),
            "error: Incorrect password.\nSign up successful! Please log in.\n"
        );
    }

    #[test]
    fn test_logged_out_hint() {
        let mut ui = TerminalUi::new(Vec::new());
        ui.render(&ViewState {
            screen: Screen::Auth(AuthView::default()),
        });
        ui.finish(Section::Cart).unwrap();
        assert!(output(ui).starts_with("Not logged in."));
    }
}
