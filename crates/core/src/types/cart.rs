//! Cart line record.

use serde::{Deserialize, Serialize};

use super::id::MenuItemId;
use super::menu::MenuItem;
use super::price::Price;

/// One aggregated (item, quantity) entry in the cart.
///
/// The item is a copy taken when the line was created, so later catalog
/// changes do not reprice it. Serialized flat, i.e. the item's fields with a
/// `quantity` field alongside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartLine {
    /// Start a line for `item` with a quantity of one.
    #[must_use]
    pub const fn new(item: MenuItem) -> Self {
        Self { item, quantity: 1 }
    }

    /// The menu item id this line aggregates.
    #[must_use]
    pub const fn id(&self) -> MenuItemId {
        self.item.id
    }

    /// Unit price captured at add-time.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        self.item.price
    }

    /// `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.item.price * self.quantity
    }
}
