//! Session cart.
//!
//! [`CartStore`] is the single source of truth for cart contents. Entries are
//! kept in insertion order and the aggregate totals are recomputed after
//! every mutation, so a reader never sees totals that disagree with the
//! entries.

mod line_item;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use quickgrub_core::ProductId;

pub use line_item::{Customizations, LineItem, Selection};

/// Aggregate figures derived from the cart entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Sum of `quantity` over all entries.
    pub total_items: i64,
    /// Sum of `unit_price * quantity` over all entries.
    pub total_price: Decimal,
}

/// In-memory cart for one session.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    items: Vec<LineItem>,
    totals: CartTotals,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item, merging it into a matching entry when one exists.
    ///
    /// A match has the same product id and structurally equal
    /// customizations. The matching entry keeps its own price and only has
    /// its quantity increased, saturating at the `i64` bounds. Quantities
    /// are not validated here.
    pub fn add_item(&mut self, item: LineItem) {
        if let Some(existing) = self.items.iter_mut().find(|e| e.is_same_entry(&item)) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
            debug!(
                product_id = %existing.id,
                quantity = existing.quantity,
                "Merged item into existing cart entry"
            );
        } else {
            debug!(product_id = %item.id, quantity = item.quantity, "Added cart entry");
            self.items.push(item);
        }
        self.recompute();
    }

    /// Remove every entry for `id`, whatever its customizations.
    ///
    /// Returns the number of entries removed.
    pub fn remove_item(&mut self, id: &ProductId) -> usize {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        let removed = before - self.items.len();
        debug!(product_id = %id, removed, "Removed cart entries");
        self.recompute();
        removed
    }

    /// Remove only the entry for `id` with exactly these customizations.
    ///
    /// Use this when several variants of one product are in the cart and
    /// only one should go. Returns whether an entry was removed.
    pub fn remove_entry(&mut self, id: &ProductId, customizations: Option<&Customizations>) -> bool {
        let position = self
            .items
            .iter()
            .position(|item| &item.id == id && item.customizations.as_ref() == customizations);
        let Some(index) = position else {
            return false;
        };
        self.items.remove(index);
        debug!(product_id = %id, "Removed single cart entry");
        self.recompute();
        true
    }

    /// Set the quantity of the first entry for `id`.
    ///
    /// A quantity of zero or below removes every entry for `id`. Unknown ids
    /// are ignored.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|item| &item.id == id) {
            item.quantity = quantity;
            debug!(product_id = %id, quantity, "Updated cart quantity");
            self.recompute();
        }
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        debug!(entries = self.items.len(), "Cleared cart");
        self.items.clear();
        self.recompute();
    }

    /// Current entries in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Current aggregate totals.
    #[must_use]
    pub const fn totals(&self) -> CartTotals {
        self.totals
    }

    /// Total number of units across all entries (the nav badge count).
    #[must_use]
    pub const fn total_items(&self) -> i64 {
        self.totals.total_items
    }

    /// Total price across all entries.
    #[must_use]
    pub const fn total_price(&self) -> Decimal {
        self.totals.total_price
    }

    /// Number of distinct entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // Saturating sums: `add_item` stores any quantity it is given.
    fn recompute(&mut self) {
        self.totals = CartTotals {
            total_items: self
                .items
                .iter()
                .fold(0_i64, |acc, item| acc.saturating_add(item.quantity)),
            total_price: self
                .items
                .iter()
                .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.line_total())),
        };
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use quickgrub_core::ChoiceId;

    use super::*;

    fn line(id: &str, cents: i64, quantity: i64, customizations: Option<Customizations>) -> LineItem {
        LineItem {
            id: ProductId::new(id),
            name: id.to_uppercase(),
            unit_price: Decimal::new(cents, 2),
            quantity,
            image: format!("{id}.png"),
            customizations,
        }
    }

    fn sized(size: &str) -> Option<Customizations> {
        Some(Customizations::from([(
            "Size".to_string(),
            Selection::Single(ChoiceId::new(size)),
        )]))
    }

    fn assert_totals_consistent(cart: &CartStore) {
        let items: i64 = cart.items().iter().map(|i| i.quantity).sum();
        let price: Decimal = cart.items().iter().map(LineItem::line_total).sum();
        assert_eq!(cart.total_items(), items);
        assert_eq!(cart.total_price(), price);
    }

    #[test]
    fn test_add_merges_matching_entries() {
        let mut cart = CartStore::new();
        cart.add_item(line("pizza", 1200, 1, sized("large")));
        cart.add_item(line("pizza", 9999, 2, sized("large")));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
        // First-inserted price wins
        assert_eq!(cart.items()[0].unit_price, Decimal::new(1200, 2));
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), Decimal::new(3600, 2));
    }

    #[test]
    fn test_add_keeps_distinct_customizations_apart() {
        let mut cart = CartStore::new();
        cart.add_item(line("pizza", 1000, 1, sized("regular")));
        cart.add_item(line("pizza", 1250, 1, sized("large")));
        cart.add_item(line("pizza", 1000, 1, None));

        assert_eq!(cart.len(), 3);
        assert_totals_consistent(&cart);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = CartStore::new();
        for id in ["fries", "cola", "burger"] {
            cart.add_item(line(id, 100, 1, None));
        }
        cart.add_item(line("fries", 100, 1, None));
        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["fries", "cola", "burger"]);
    }

    #[test]
    fn test_add_accepts_non_positive_quantity() {
        let mut cart = CartStore::new();
        cart.add_item(line("cola", 199, 0, None));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn test_remove_item_drops_every_variant() {
        let mut cart = CartStore::new();
        cart.add_item(line("pizza", 1000, 1, sized("regular")));
        cart.add_item(line("pizza", 1250, 2, sized("large")));
        cart.add_item(line("cola", 199, 1, None));

        assert_eq!(cart.remove_item(&ProductId::new("pizza")), 2);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_price(), Decimal::new(199, 2));
    }

    #[test]
    fn test_remove_entry_targets_one_variant() {
        let mut cart = CartStore::new();
        cart.add_item(line("pizza", 1000, 1, sized("regular")));
        cart.add_item(line("pizza", 1250, 2, sized("large")));

        let large = sized("large");
        assert!(cart.remove_entry(&ProductId::new("pizza"), large.as_ref()));
        assert!(!cart.remove_entry(&ProductId::new("pizza"), large.as_ref()));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_items(), 1);
        assert_totals_consistent(&cart);
    }

    #[test]
    fn test_update_quantity_sets_first_match() {
        let mut cart = CartStore::new();
        cart.add_item(line("pizza", 1000, 1, sized("regular")));
        cart.add_item(line("pizza", 1250, 1, sized("large")));

        cart.update_quantity(&ProductId::new("pizza"), 4);
        assert_eq!(cart.items()[0].quantity, 4);
        assert_eq!(cart.items()[1].quantity, 1);
        assert_eq!(cart.total_items(), 5);
        assert_totals_consistent(&cart);
    }

    #[test]
    fn test_update_quantity_floor_removes_entry() {
        for quantity in [0, -5] {
            let mut cart = CartStore::new();
            cart.add_item(line("cola", 199, 2, None));
            cart.add_item(line("fries", 299, 1, None));
            cart.update_quantity(&ProductId::new("cola"), quantity);
            assert!(cart.items().iter().all(|i| i.id.as_str() != "cola"));
            assert_eq!(cart.total_items(), 1);
        }
    }

    #[test]
    fn test_update_quantity_unknown_id_is_noop() {
        let mut cart = CartStore::new();
        cart.add_item(line("cola", 199, 2, None));
        cart.update_quantity(&ProductId::new("missing"), 7);
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_clear_resets_totals() {
        let mut cart = CartStore::new();
        cart.add_item(line("cola", 199, 2, None));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.totals(), CartTotals::default());
    }

    #[test]
    fn test_totals_consistent_over_mixed_sequence() {
        let mut cart = CartStore::new();
        let pizza = ProductId::new("pizza");
        cart.add_item(line("pizza", 1000, 2, sized("regular")));
        assert_totals_consistent(&cart);
        cart.add_item(line("cola", 199, 3, None));
        assert_totals_consistent(&cart);
        cart.update_quantity(&pizza, 5);
        assert_totals_consistent(&cart);
        cart.add_item(line("pizza", 1250, 1, sized("large")));
        assert_totals_consistent(&cart);
        cart.remove_item(&ProductId::new("cola"));
        assert_totals_consistent(&cart);
        cart.update_quantity(&pizza, -1);
        assert_totals_consistent(&cart);
        assert!(cart.is_empty());
        cart.add_item(line("fries", 299, 1, None));
        cart.clear();
        assert_totals_consistent(&cart);
    }

    #[test]
    fn test_merge_saturates_at_max_quantity() {
        let mut cart = CartStore::new();
        cart.add_item(line("soda", 100, i64::MAX, None));
        cart.add_item(line("soda", 100, 1, None));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, i64::MAX);
        assert_eq!(cart.total_items(), i64::MAX);
        assert_eq!(cart.total_price(), Decimal::from(i64::MAX));
    }

    #[test]
    fn test_totals_saturate_across_entries() {
        let mut cart = CartStore::new();
        cart.add_item(line("soda", 100, i64::MAX, None));
        cart.add_item(line("water", 100, i64::MAX, None));
        assert_eq!(cart.total_items(), i64::MAX);

        cart.add_item(LineItem {
            unit_price: Decimal::MAX,
            ..line("caviar", 0, 2, None)
        });
        assert_eq!(cart.total_price(), Decimal::MAX);

        cart.remove_item(&ProductId::new("caviar"));
        assert_eq!(cart.total_price(), Decimal::from(i64::MAX) * Decimal::TWO);
    }
}
