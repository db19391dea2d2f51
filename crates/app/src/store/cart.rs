//! Cart line list.
//!
//! Totals are always derived from the lines, never cached.

use food3d_core::{CartLine, MenuItem, MenuItemId, Price};

/// Ordered list of cart lines, at most one per menu item id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Build a cart from persisted lines.
    ///
    /// Lines with a zero quantity are dropped and duplicate ids are merged
    /// into the first occurrence, so a hand-edited slot cannot break the
    /// one-line-per-item invariant.
    #[must_use]
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::default();
        for line in lines.into_iter().filter(|line| line.quantity > 0) {
            match cart.position(line.id()) {
                Some(index) => {
                    if let Some(existing) = cart.lines.get_mut(index) {
                        existing.quantity = existing.quantity.saturating_add(line.quantity);
                    }
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns true if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line for `id`, if any.
    #[must_use]
    pub fn line(&self, id: MenuItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    /// Add one unit of `item`.
    ///
    /// An existing line is incremented; otherwise a new line copies the item
    /// (including its current price) with a quantity of one.
    pub fn add(&mut self, item: &MenuItem) {
        match self.lines.iter_mut().find(|line| line.id() == item.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine::new(item.clone())),
        }
    }

    /// Apply `delta` to the quantity of the line for `id`.
    ///
    /// A resulting quantity of zero or less removes the line. Returns false
    /// (and changes nothing) if there is no line for `id`.
    pub fn change_quantity(&mut self, id: MenuItemId, delta: i64) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let Some(line) = self.lines.get_mut(index) else {
            return false;
        };

        let updated = i64::from(line.quantity).saturating_add(delta);
        if updated <= 0 {
            self.lines.remove(index);
        } else {
            line.quantity = u32::try_from(updated).unwrap_or(u32::MAX);
        }
        true
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |acc, line| acc.saturating_add(line.quantity))
    }

    fn position(&self, id: MenuItemId) -> Option<usize> {
        self.lines.iter().position(|line| line.id() == id)
    }
}
