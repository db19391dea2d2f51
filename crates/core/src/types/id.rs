//! Menu item identifier.

use core::fmt;
use core::num::ParseIntError;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Server-assigned menu item id.
///
/// Serialized as a bare JSON integer. Cart lines are keyed by it, so a menu
/// must not repeat one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuItemId(i32);

impl MenuItemId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }
}

impl fmt::Display for MenuItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses a decimal integer, ignoring surrounding whitespace.
impl FromStr for MenuItemId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<i32> for MenuItemId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl From<MenuItemId> for i32 {
    fn from(id: MenuItemId) -> Self {
        id.0
    }
}
