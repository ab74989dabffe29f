//! Catalog records as served by the menu API.
//!
//! Field names follow the API's JSON (`price`, `type`, `categoryId`) so a
//! response body can be deserialized directly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use quickgrub_core::{CategoryId, ChoiceId, ProductId, RestaurantId};

// =============================================================================
// Options
// =============================================================================

/// Whether an option group takes one choice or any number of choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionKind {
    /// Radio group: exactly one choice.
    #[serde(rename = "single-select", alias = "radio")]
    SingleSelect,
    /// Checkbox group: zero or more choices.
    #[serde(rename = "multi-select", alias = "checkbox")]
    MultiSelect,
}

/// One selectable choice within an option group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: ChoiceId,
    pub name: String,
    /// Surcharge over the base price. Zero when the API omits it.
    #[serde(rename = "price", default)]
    pub price_delta: Decimal,
}

/// A named group of choices on a product (e.g. "Size", "Add-ons").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    /// Label, unique within its product.
    pub name: String,
    #[serde(rename = "type")]
    pub kind: OptionKind,
    #[serde(default)]
    pub required: bool,
    pub choices: Vec<Choice>,
}

impl ProductOption {
    /// Look up a choice by id.
    #[must_use]
    pub fn choice(&self, id: &ChoiceId) -> Option<&Choice> {
        self.choices.iter().find(|choice| &choice.id == id)
    }
}

// =============================================================================
// Products
// =============================================================================

/// A menu product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Price before any option surcharges.
    #[serde(rename = "price")]
    pub base_price: Decimal,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Restaurant serving this product, if the menu has more than one.
    #[serde(default)]
    pub restaurant_id: Option<RestaurantId>,
    #[serde(default)]
    pub options: Vec<ProductOption>,
}

impl Product {
    /// Look up an option group by name.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&ProductOption> {
        self.options.iter().find(|option| option.name == name)
    }

    /// Case-insensitive match against name and description.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn matches_query(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }
}

/// A menu category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub image: String,
}

// =============================================================================
// Restaurants
// =============================================================================

/// A restaurant whose products appear in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    #[serde(default)]
    pub image: String,
    /// Average review score, 0 to 5.
    #[serde(default)]
    pub rating: Decimal,
    #[serde(default)]
    pub review_count: u32,
    /// Estimated delivery window, e.g. "20-30 min".
    #[serde(default)]
    pub delivery_time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Cuisine tags shown on the restaurant card.
    #[serde(default, alias = "categories")]
    pub cuisines: Vec<String>,
}

impl Restaurant {
    /// Highest rating a restaurant can have.
    pub const MAX_RATING: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

    /// One-line summary: name, rating and whatever else is known.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("{} ({:.1})", self.name, self.rating)];
        if !self.cuisines.is_empty() {
            parts.push(self.cuisines.join(", "));
        }
        parts.extend(self.delivery_time.iter().cloned());
        parts.extend(self.location.iter().cloned());
        parts.join(" | ")
    }
}
