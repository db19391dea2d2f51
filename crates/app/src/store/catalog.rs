//! In-memory menu catalog with fetch sequencing.
//!
//! Each fetch is issued a [`FetchTicket`]. Only the response for the most
//! recently issued ticket may change the catalog; responses for older
//! tickets are stale and dropped, whatever order they arrive in.

use food3d_core::{CategoryFilter, MenuItem, MenuItemId};

/// Sequence number handed out when a catalog fetch starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

impl FetchTicket {
    /// The raw sequence number.
    #[must_use]
    pub const fn sequence(self) -> u64 {
        self.0
    }
}

/// Load state of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogStatus {
    /// No fetch has been issued since the last reset.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The latest fetch succeeded.
    Loaded,
    /// The latest fetch failed; the message is shown in place of the menu.
    Failed(String),
}

/// Result of handing a fetch response to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The catalog was replaced with this many items.
    Applied(usize),
    /// The fetch failed and the catalog was emptied.
    Failed,
    /// A newer fetch was issued; the response was ignored.
    Stale,
}

/// The current list of purchasable items.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<MenuItem>,
    status: CatalogStatus,
    latest: u64,
}

impl Catalog {
    /// All items in server order.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Current load state.
    #[must_use]
    pub const fn status(&self) -> &CatalogStatus {
        &self.status
    }

    /// Look up an item by id.
    #[must_use]
    pub fn find(&self, id: MenuItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items passing `filter`, in original relative order.
    #[must_use]
    pub fn filter(&self, filter: &CategoryFilter) -> Vec<&MenuItem> {
        filter.apply(&self.items)
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for item in &self.items {
            if !categories.contains(&item.category.as_str()) {
                categories.push(&item.category);
            }
        }
        categories
    }

    /// Start a fetch. Any earlier ticket becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest += 1;
        self.status = CatalogStatus::Loading;
        FetchTicket(self.latest)
    }

    /// Returns true if `ticket` is the most recently issued one.
    #[must_use]
    pub const fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Replace the catalog wholesale with a successful fetch result.
    pub fn complete(&mut self, ticket: FetchTicket, items: Vec<MenuItem>) -> FetchOutcome {
        if !self.is_current(ticket) {
            return FetchOutcome::Stale;
        }
        let count = items.len();
        self.items = items;
        self.status = CatalogStatus::Loaded;
        FetchOutcome::Applied(count)
    }

    /// Record a failed fetch: the catalog is left empty.
    pub fn fail(&mut self, ticket: FetchTicket, message: String) -> FetchOutcome {
        if !self.is_current(ticket) {
            return FetchOutcome::Stale;
        }
        self.items.clear();
        self.status = CatalogStatus::Failed(message);
        FetchOutcome::Failed
    }

    /// Drop all items and invalidate any in-flight fetch.
    pub fn reset(&mut self) {
        self.latest += 1;
        self.items.clear();
        self.status = CatalogStatus::Idle;
    }
}
