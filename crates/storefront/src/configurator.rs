//! Product configuration dialog state.
//!
//! An [`ItemConfigurator`] lives as long as one open product dialog. It
//! tracks the chosen options and quantity, keeps a running surcharge, and
//! turns the result into a [`LineItem`] for the cart.
//!
//! Finalizing goes through [`ItemConfigurator::validate`], which hands back a
//! [`ValidatedItem`] borrowing the configurator. A line item can therefore
//! only be built from a selection that passed required-option checks and has
//! not changed since.
//!
//! ```
//! # use quickgrub_storefront::catalog::Catalog;
//! # use quickgrub_storefront::configurator::ItemConfigurator;
//! # use quickgrub_core::{ChoiceId, ProductId};
//! # let catalog = Catalog::from_json(r#"{"products": [{"id": "p", "name": "P", "price": 4,
//! #   "options": [{"name": "Size", "type": "radio", "required": true,
//! #     "choices": [{"id": "large", "name": "Large", "price": 1}]}]}]}"#).unwrap();
//! let product = catalog.product(&ProductId::new("p")).unwrap();
//! let mut dialog = ItemConfigurator::new(product);
//! assert!(dialog.validate().is_err());
//!
//! dialog.select_single("Size", &ChoiceId::new("large")).unwrap();
//! let line = dialog.validate().unwrap().finalize();
//! assert_eq!(line.unit_price.to_string(), "5");
//! ```

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::trace;

use quickgrub_core::ChoiceId;

use crate::cart::{Customizations, LineItem, Selection};
use crate::catalog::{Choice, OptionKind, Product, ProductOption};

/// Errors raised while configuring a product.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfiguratorError {
    /// A required option group has no qualifying selection.
    #[error("please select {option}")]
    MissingRequired { option: String },

    #[error("product has no option named {0:?}")]
    UnknownOption(String),

    #[error("option {option:?} has no choice {choice}")]
    UnknownChoice { option: String, choice: ChoiceId },

    /// A single-select call on a multi-select option or the reverse.
    #[error("option {option:?} is {actual:?}")]
    WrongKind { option: String, actual: OptionKind },
}

/// Selection state for one product dialog.
#[derive(Debug, Clone)]
pub struct ItemConfigurator<'p> {
    product: &'p Product,
    quantity: u32,
    selections: Customizations,
    price_delta: Decimal,
}

impl<'p> ItemConfigurator<'p> {
    /// Open a fresh dialog for `product`: quantity 1, nothing selected.
    #[must_use]
    pub fn new(product: &'p Product) -> Self {
        Self {
            product,
            quantity: 1,
            selections: Customizations::new(),
            price_delta: Decimal::ZERO,
        }
    }

    #[must_use]
    pub const fn product(&self) -> &'p Product {
        self.product
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    #[must_use]
    pub const fn selections(&self) -> &Customizations {
        &self.selections
    }

    /// Sum of the surcharges of every selected choice.
    #[must_use]
    pub const fn price_delta(&self) -> Decimal {
        self.price_delta
    }

    /// Choose `choice_id` as the only selection of a single-select option.
    ///
    /// Re-selecting the current choice changes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the option or choice does not exist, or the option
    /// is multi-select.
    pub fn select_single(
        &mut self,
        option_name: &str,
        choice_id: &ChoiceId,
    ) -> Result<(), ConfiguratorError> {
        let option = self.option(option_name, OptionKind::SingleSelect)?;
        let choice = Self::choice(option, choice_id)?;

        let previous = match self.selections.get(option_name) {
            Some(Selection::Single(current)) if current == choice_id => return Ok(()),
            Some(Selection::Single(current)) => option.choice(current),
            _ => None,
        };
        if let Some(previous) = previous {
            self.price_delta -= previous.price_delta;
        }
        self.price_delta += choice.price_delta;
        self.selections
            .insert(option_name.to_owned(), Selection::Single(choice_id.clone()));

        trace!(option = option_name, choice = %choice_id, delta = %self.price_delta, "Selected choice");
        Ok(())
    }

    /// Flip `choice_id` in a multi-select option.
    ///
    /// Returns whether the choice is selected afterwards. An option whose
    /// last choice is toggled off is dropped from the selections, so an
    /// untouched option and a cleared one produce equal line items.
    ///
    /// # Errors
    ///
    /// Returns an error if the option or choice does not exist, or the option
    /// is single-select.
    pub fn toggle_multi(
        &mut self,
        option_name: &str,
        choice_id: &ChoiceId,
    ) -> Result<bool, ConfiguratorError> {
        let option = self.option(option_name, OptionKind::MultiSelect)?;
        let delta = Self::choice(option, choice_id)?.price_delta;

        let mut chosen = match self.selections.remove(option_name) {
            Some(Selection::Multi(set)) => set,
            _ => BTreeSet::new(),
        };
        let selected = if chosen.remove(choice_id) {
            self.price_delta -= delta;
            false
        } else {
            chosen.insert(choice_id.clone());
            self.price_delta += delta;
            true
        };
        if !chosen.is_empty() {
            self.selections
                .insert(option_name.to_owned(), Selection::Multi(chosen));
        }

        trace!(option = option_name, choice = %choice_id, selected, delta = %self.price_delta, "Toggled choice");
        Ok(selected)
    }

    /// Set the quantity, clamping anything below 1 up to 1.
    pub fn set_quantity(&mut self, n: i64) {
        self.quantity = u32::try_from(n.max(1)).unwrap_or(u32::MAX);
    }

    pub const fn increase_quantity(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    /// Decrease the quantity, stopping at 1.
    pub const fn decrease_quantity(&mut self) {
        if self.quantity > 1 {
            self.quantity -= 1;
        }
    }

    /// Base price plus the selected surcharges.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.product.base_price + self.price_delta
    }

    /// `unit_price() * quantity()`.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.unit_price().saturating_mul(Decimal::from(self.quantity))
    }

    /// Check every required option group, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `ConfiguratorError::MissingRequired` naming the first required
    /// option without a qualifying selection.
    pub fn validate(&self) -> Result<ValidatedItem<'_, 'p>, ConfiguratorError> {
        let missing = self
            .product
            .options
            .iter()
            .filter(|option| option.required)
            .find(|option| !self.is_satisfied(option));

        match missing {
            Some(option) => Err(ConfiguratorError::MissingRequired {
                option: option.name.clone(),
            }),
            None => Ok(ValidatedItem { configurator: self }),
        }
    }

    fn is_satisfied(&self, option: &ProductOption) -> bool {
        match (option.kind, self.selections.get(&option.name)) {
            (OptionKind::SingleSelect, Some(Selection::Single(_))) => true,
            (OptionKind::MultiSelect, Some(Selection::Multi(set))) => !set.is_empty(),
            _ => false,
        }
    }

    fn option(&self, name: &str, kind: OptionKind) -> Result<&'p ProductOption, ConfiguratorError> {
        let option = self
            .product
            .option(name)
            .ok_or_else(|| ConfiguratorError::UnknownOption(name.to_owned()))?;
        if option.kind != kind {
            return Err(ConfiguratorError::WrongKind {
                option: name.to_owned(),
                actual: option.kind,
            });
        }
        Ok(option)
    }

    fn choice<'o>(option: &'o ProductOption, id: &ChoiceId) -> Result<&'o Choice, ConfiguratorError> {
        option
            .choice(id)
            .ok_or_else(|| ConfiguratorError::UnknownChoice {
                option: option.name.clone(),
                choice: id.clone(),
            })
    }
}

/// Proof that a configurator passed [`ItemConfigurator::validate`].
///
/// Holds a shared borrow, so the selection cannot change before
/// [`ValidatedItem::finalize`] is called.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedItem<'c, 'p> {
    configurator: &'c ItemConfigurator<'p>,
}

impl ValidatedItem<'_, '_> {
    /// Build the line item to hand to [`crate::cart::CartStore::add_item`].
    #[must_use]
    pub fn finalize(self) -> LineItem {
        let c = self.configurator;
        LineItem {
            id: c.product.id.clone(),
            name: c.product.name.clone(),
            unit_price: c.unit_price(),
            quantity: i64::from(c.quantity),
            image: c.product.image.clone(),
            customizations: Some(c.selections.clone()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use quickgrub_core::ProductId;

    use super::*;
    use crate::catalog::Choice;

    fn choice(id: &str, cents: i64) -> Choice {
        Choice {
            id: ChoiceId::new(id),
            name: id.to_string(),
            price_delta: Decimal::new(cents, 2),
        }
    }

    fn burger() -> Product {
        Product {
            id: ProductId::new("burger"),
            name: "Burger".to_string(),
            base_price: Decimal::new(1000, 2),
            image: "burger.png".to_string(),
            description: None,
            category_id: None,
            restaurant_id: None,
            options: vec![
                ProductOption {
                    name: "Size".to_string(),
                    kind: OptionKind::SingleSelect,
                    required: true,
                    choices: vec![choice("regular", 0), choice("large", 250)],
                },
                ProductOption {
                    name: "Add-ons".to_string(),
                    kind: OptionKind::MultiSelect,
                    required: false,
                    choices: vec![choice("cheese", 100), choice("bacon", 150)],
                },
            ],
        }
    }

    fn id(s: &str) -> ChoiceId {
        ChoiceId::new(s)
    }

    #[test]
    fn test_starts_empty() {
        let product = burger();
        let dialog = ItemConfigurator::new(&product);
        assert_eq!(dialog.quantity(), 1);
        assert!(dialog.selections().is_empty());
        assert_eq!(dialog.unit_price(), Decimal::new(1000, 2));
    }

    #[test]
    fn test_burger_scenario_prices() {
        let product = burger();
        let mut dialog = ItemConfigurator::new(&product);
        dialog.select_single("Size", &id("large")).unwrap();
        dialog.toggle_multi("Add-ons", &id("cheese")).unwrap();
        dialog.set_quantity(2);

        assert_eq!(dialog.unit_price(), Decimal::new(1350, 2));
        assert_eq!(dialog.total_price(), Decimal::new(2700, 2));
    }

    #[test]
    fn test_switching_single_choice_replaces_delta() {
        let product = burger();
        let mut dialog = ItemConfigurator::new(&product);
        dialog.select_single("Size", &id("large")).unwrap();
        dialog.select_single("Size", &id("large")).unwrap();
        assert_eq!(dialog.price_delta(), Decimal::new(250, 2));

        dialog.select_single("Size", &id("regular")).unwrap();
        assert_eq!(dialog.price_delta(), Decimal::ZERO);
        assert_eq!(
            dialog.selections().get("Size"),
            Some(&Selection::Single(id("regular")))
        );
    }

    #[test]
    fn test_toggle_is_symmetric() {
        let product = burger();
        let mut dialog = ItemConfigurator::new(&product);
        dialog.toggle_multi("Add-ons", &id("bacon")).unwrap();
        let before = dialog.price_delta();

        for _ in 0..25 {
            assert!(dialog.toggle_multi("Add-ons", &id("cheese")).unwrap());
            assert!(!dialog.toggle_multi("Add-ons", &id("cheese")).unwrap());
        }
        assert_eq!(dialog.price_delta(), before);
    }

    #[test]
    fn test_toggling_last_choice_off_drops_option() {
        let product = burger();
        let mut dialog = ItemConfigurator::new(&product);
        dialog.toggle_multi("Add-ons", &id("cheese")).unwrap();
        dialog.toggle_multi("Add-ons", &id("cheese")).unwrap();
        assert!(dialog.selections().is_empty());
        assert_eq!(dialog.price_delta(), Decimal::ZERO);
    }

    #[test]
    fn test_quantity_never_drops_below_one() {
        let product = burger();
        let mut dialog = ItemConfigurator::new(&product);
        dialog.set_quantity(0);
        assert_eq!(dialog.quantity(), 1);
        dialog.set_quantity(-3);
        assert_eq!(dialog.quantity(), 1);
        dialog.decrease_quantity();
        assert_eq!(dialog.quantity(), 1);
        dialog.increase_quantity();
        assert_eq!(dialog.quantity(), 2);
    }

    #[test]
    fn test_validate_reports_first_missing_required() {
        let product = burger();
        let dialog = ItemConfigurator::new(&product);
        assert_eq!(
            dialog.validate().unwrap_err(),
            ConfiguratorError::MissingRequired {
                option: "Size".to_string()
            }
        );
    }

    #[test]
    fn test_required_multi_select_needs_a_choice() {
        let mut product = burger();
        product.options[1].required = true;
        let mut dialog = ItemConfigurator::new(&product);
        dialog.select_single("Size", &id("regular")).unwrap();
        assert!(matches!(
            dialog.validate(),
            Err(ConfiguratorError::MissingRequired { option }) if option == "Add-ons"
        ));

        dialog.toggle_multi("Add-ons", &id("bacon")).unwrap();
        assert!(dialog.validate().is_ok());
    }

    #[test]
    fn test_finalize_builds_line_item() {
        let product = burger();
        let mut dialog = ItemConfigurator::new(&product);
        dialog.select_single("Size", &id("large")).unwrap();
        dialog.toggle_multi("Add-ons", &id("bacon")).unwrap();
        dialog.toggle_multi("Add-ons", &id("cheese")).unwrap();
        dialog.set_quantity(3);

        let line = dialog.validate().unwrap().finalize();
        assert_eq!(line.id, ProductId::new("burger"));
        assert_eq!(line.quantity, 3);
        assert_eq!(line.unit_price, Decimal::new(1500, 2));
        let custom = line.customizations.unwrap();
        assert_eq!(custom.get("Size"), Some(&Selection::Single(id("large"))));
        assert_eq!(
            custom.get("Add-ons"),
            Some(&Selection::Multi([id("cheese"), id("bacon")].into_iter().collect()))
        );
    }

    #[test]
    fn test_rejects_unknown_option_and_choice() {
        let product = burger();
        let mut dialog = ItemConfigurator::new(&product);
        assert!(matches!(
            dialog.select_single("Crust", &id("thin")),
            Err(ConfiguratorError::UnknownOption(_))
        ));
        assert!(matches!(
            dialog.select_single("Size", &id("huge")),
            Err(ConfiguratorError::UnknownChoice { .. })
        ));
        assert_eq!(dialog.price_delta(), Decimal::ZERO);
    }

    #[test]
    fn test_rejects_wrong_kind() {
        let product = burger();
        let mut dialog = ItemConfigurator::new(&product);
        assert!(matches!(
            dialog.toggle_multi("Size", &id("large")),
            Err(ConfiguratorError::WrongKind { .. })
        ));
        assert!(matches!(
            dialog.select_single("Add-ons", &id("cheese")),
            Err(ConfiguratorError::WrongKind { .. })
        ));
    }
}
