//! Application store.
//!
//! [`Store`] owns the persistent slot and every piece of client state: the
//! catalog, the cart, the account directory and the session. It is created
//! once by the composition root with [`Store::load`] and handed to the view
//! layer by reference. Mutations persist immediately; a failed write is
//! logged and the in-memory state stays authoritative.

mod accounts;
mod cart;
mod catalog;

pub use accounts::{AccountDirectory, AuthError};
pub use cart::Cart;
pub use catalog::{Catalog, CatalogStatus, FetchOutcome, FetchTicket};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use food3d_core::{CartLine, Email, MenuItem, MenuItemId, Price, Session};

use crate::menu_source::CatalogError;
use crate::storage::{KeyValueSlot, StorageError, keys, read_json, write_json};
use accounts::StoredDirectory;

/// Confirmation for a mock checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReceipt {
    pub id: Uuid,
    pub total: Price,
    pub item_count: u32,
    pub placed_at: DateTime<Utc>,
}

/// All client state plus the slot it is mirrored to.
#[derive(Debug)]
pub struct Store<S> {
    slot: S,
    catalog: Catalog,
    cart: Cart,
    accounts: AccountDirectory,
    session: Session,
}

impl<S: KeyValueSlot> Store<S> {
    /// Hydrate the store from `slot`.
    ///
    /// Missing or malformed values load as their defaults: logged out, no
    /// accounts, empty cart. A login flag without a readable current user
    /// counts as logged out. The catalog always starts empty.
    pub fn load(slot: S) -> Self {
        let logged_in = read_json::<bool>(&slot, keys::LOGGED_IN).unwrap_or(false);
        let current_user_email = read_json::<Email>(&slot, keys::CURRENT_USER);
        let mut session = Session {
            logged_in,
            current_user_email,
        };
        if session.logged_in && !session.is_active() {
            tracing::debug!("Login flag set without a current user, starting logged out");
            session = Session::default();
        }

        let accounts = read_json::<StoredDirectory>(&slot, keys::USERS)
            .map(AccountDirectory::from)
            .unwrap_or_default();

        let cart = read_json::<Vec<CartLine>>(&slot, keys::CART)
            .map(Cart::from_lines)
            .unwrap_or_default();

        tracing::debug!(
            logged_in = session.logged_in,
            accounts = accounts.len(),
            cart_lines = cart.lines().len(),
            "Store loaded"
        );

        Self {
            slot,
            catalog: Catalog::default(),
            cart,
            accounts,
            session,
        }
    }

    /// The persistent slot.
    #[must_use]
    pub const fn slot(&self) -> &S {
        &self.slot
    }

    /// Give back the slot, e.g. to reload a fresh store from it.
    #[must_use]
    pub fn into_slot(self) -> S {
        self.slot
    }

    /// The menu catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The account directory.
    #[must_use]
    pub const fn accounts(&self) -> &AccountDirectory {
        &self.accounts
    }

    /// The session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit of catalog item `id` to the cart.
    ///
    /// Returns false (and changes nothing) if `id` is not in the catalog.
    pub fn add_to_cart(&mut self, id: MenuItemId) -> bool {
        let Some(item) = self.catalog.find(id) else {
            tracing::debug!(%id, "Ignoring add for unknown menu item");
            return false;
        };
        self.cart.add(item);
        tracing::info!(%id, name = %item.name, "Added to cart");
        self.persist_cart();
        true
    }

    /// Apply `delta` to the cart line for `id`, removing it at zero or below.
    ///
    /// Returns false (and changes nothing) if there is no line for `id`.
    pub fn change_quantity(&mut self, id: MenuItemId, delta: i64) -> bool {
        if !self.cart.change_quantity(id, delta) {
            return false;
        }
        self.persist_cart();
        true
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.persist_cart();
    }

    /// Mock checkout: record the total and empty the cart.
    ///
    /// Returns `None` for an empty cart, which is left untouched.
    pub fn checkout(&mut self) -> Option<OrderReceipt> {
        if self.cart.is_empty() {
            return None;
        }
        let receipt = OrderReceipt {
            id: Uuid::new_v4(),
            total: self.cart.total(),
            item_count: self.cart.count(),
            placed_at: Utc::now(),
        };
        self.clear_cart();
        tracing::info!(order_id = %receipt.id, total = %receipt.total, "Order placed");
        Some(receipt)
    }

    // =========================================================================
    // Accounts & session
    // =========================================================================

    /// Register a new account. Does not log the user in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` for a malformed email and
    /// `AuthError::UserAlreadyExists` if the email is taken.
    pub fn register(&mut self, email: &str, password: &str) -> Result<Email, AuthError> {
        let email = Email::parse(email)?;
        self.accounts.register(email.clone(), password)?;
        if let Err(e) = write_json(&mut self.slot, keys::USERS, &self.accounts) {
            log_persist_error(keys::USERS, &e);
        }
        tracing::info!(%email, "Account registered");
        Ok(email)
    }

    /// Log in and persist the session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail`, `AuthError::UserNotFound` or
    /// `AuthError::IncorrectPassword`; the session is left unchanged.
    pub fn login(&mut self, email: &str, password: &str) -> Result<Email, AuthError> {
        let email = Email::parse(email)?;
        self.accounts.verify(&email, password)?;

        self.session = Session::logged_in_as(email.clone());
        if let Err(e) = write_json(&mut self.slot, keys::LOGGED_IN, &true) {
            log_persist_error(keys::LOGGED_IN, &e);
        }
        if let Err(e) = write_json(&mut self.slot, keys::CURRENT_USER, &email) {
            log_persist_error(keys::CURRENT_USER, &e);
        }
        tracing::info!(%email, "Logged in");
        Ok(email)
    }

    /// Clear the session and drop the catalog.
    pub fn logout(&mut self) {
        if let Some(email) = self.session.current_user() {
            tracing::info!(%email, "Logged out");
        }
        self.session = Session::default();
        self.catalog.reset();
        for key in [keys::LOGGED_IN, keys::CURRENT_USER] {
            if let Err(e) = self.slot.remove(key) {
                log_persist_error(key, &e);
            }
        }
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Start a catalog fetch.
    pub fn begin_catalog_fetch(&mut self) -> FetchTicket {
        self.catalog.begin_fetch()
    }

    /// Apply the result of the fetch started with `ticket`.
    pub fn finish_catalog_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<MenuItem>, CatalogError>,
    ) -> FetchOutcome {
        let outcome = match result {
            Ok(items) => self.catalog.complete(ticket, items),
            Err(e) => {
                tracing::error!(error = %e, "Failed to load menu");
                self.catalog.fail(ticket, e.to_string())
            }
        };
        if outcome == FetchOutcome::Stale {
            tracing::debug!(
                ticket = ticket.sequence(),
                "Dropping response for superseded menu fetch"
            );
        }
        outcome
    }

    fn persist_cart(&mut self) {
        if let Err(e) = write_json(&mut self.slot, keys::CART, self.cart.lines()) {
            log_persist_error(keys::CART, &e);
        }
    }
}

fn log_persist_error(key: &str, error: &StorageError) {
    tracing::warn!(key, error = %error, "Failed to persist storage value");
}
