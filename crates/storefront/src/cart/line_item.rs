//! Cart line items and their customization values.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use quickgrub_core::{ChoiceId, ProductId};

/// The value chosen for one option group.
///
/// Serialized untagged: a single-select option is a bare choice id, a
/// multi-select option is an array of choice ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selection {
    /// Exactly one choice of a single-select option.
    Single(ChoiceId),
    /// The chosen subset of a multi-select option. Order never matters.
    Multi(BTreeSet<ChoiceId>),
}

impl Selection {
    /// Whether `choice` is part of this selection.
    #[must_use]
    pub fn contains(&self, choice: &ChoiceId) -> bool {
        match self {
            Self::Single(selected) => selected == choice,
            Self::Multi(selected) => selected.contains(choice),
        }
    }

    /// Iterate over every selected choice id.
    pub fn choices(&self) -> Box<dyn Iterator<Item = &ChoiceId> + '_> {
        match self {
            Self::Single(selected) => Box::new(std::iter::once(selected)),
            Self::Multi(selected) => Box::new(selected.iter()),
        }
    }
}

/// Option name to selected value.
///
/// A sorted map, so two customizations with the same keys and values are
/// equal regardless of the order the user picked them in.
pub type Customizations = BTreeMap<String, Selection>;

/// One distinct (product, customization set) entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Catalog product this entry was built from.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Price of one unit including option surcharges.
    pub unit_price: Decimal,
    /// Number of units. The cart never keeps an entry at zero or below
    /// once it has been updated, but `add_item` stores what it is given.
    pub quantity: i64,
    /// Display asset reference.
    pub image: String,
    /// Selected options, absent for products added without configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customizations: Option<Customizations>,
}

impl LineItem {
    /// Whether `other` is the same logical cart entry.
    ///
    /// Entries match on product id and structurally equal customizations.
    /// An entry without customizations only matches another without them.
    #[must_use]
    pub fn is_same_entry(&self, other: &Self) -> bool {
        self.id == other.id && self.customizations == other.customizations
    }

    /// `unit_price * quantity`, saturating at the `Decimal` bounds.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity))
    }
}
