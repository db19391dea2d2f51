//! Menu items and category filtering.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::id::MenuItemId;
use super::price::Price;

/// A purchasable item as served by `GET /api/menu`.
///
/// Immutable once fetched. The `price` field accepts JSON numbers or numeric
/// strings (see [`Price`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Category selection for the menu grid.
///
/// The filter value `"all"` selects every item; any other value selects the
/// items whose `category` equals it exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// The filter value that selects every item.
    pub const ALL: &'static str = "all";

    /// Build a filter from a filter-button value.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value == Self::ALL {
            Self::All
        } else {
            Self::Only(value.to_owned())
        }
    }

    /// Returns true if `item` passes the filter.
    #[must_use]
    pub fn matches(&self, item: &MenuItem) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => item.category == *category,
        }
    }

    /// Returns the subsequence of `items` that passes the filter, preserving
    /// relative order.
    pub fn apply<'a>(&self, items: &'a [MenuItem]) -> Vec<&'a MenuItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }

    /// Returns the filter-button value for this filter.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => Self::ALL,
            Self::Only(category) => category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}
