//! Integration tests for QuickGrub.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p quickgrub-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Configurator into cart: pricing, merging, removal
//! - `checkout_flow` - Session, coupons, wallet and order placement
//! - `browse_flow` - Restaurants, categories and search over the menu
//!
//! Tests share the demo menu the CLI ships with.

use rust_decimal::Decimal;

use quickgrub_core::{ChoiceId, Email, Language, ProductId};
use quickgrub_storefront::catalog::{Catalog, Product};
use quickgrub_storefront::models::UserProfile;

/// Demo menu: burgers with a required size and optional add-ons, pizza with
/// a required crust, and two option-less sides.
pub const MENU_JSON: &str = include_str!("../../cli/fixtures/menu.json");

/// Parse [`MENU_JSON`].
///
/// # Panics
///
/// Panics if the bundled menu is invalid.
#[must_use]
#[allow(clippy::expect_used)]
pub fn menu() -> Catalog {
    Catalog::from_json(MENU_JSON).expect("bundled menu is valid")
}

/// Look up a product in the demo menu.
///
/// # Panics
///
/// Panics if the id is not in the menu.
#[must_use]
#[allow(clippy::expect_used)]
pub fn product<'c>(catalog: &'c Catalog, id: &str) -> &'c Product {
    catalog
        .product(&ProductId::new(id))
        .expect("product exists in demo menu")
}

/// Shorthand for a choice id.
#[must_use]
pub fn choice(id: &str) -> ChoiceId {
    ChoiceId::new(id)
}

/// Amount from cents.
#[must_use]
pub fn dollars(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// A signed-in profile with the given wallet balance.
///
/// # Panics
///
/// Panics if the fixed email fails to parse.
#[must_use]
#[allow(clippy::expect_used)]
pub fn customer(balance: Decimal) -> UserProfile {
    UserProfile {
        name: "Olena".to_string(),
        email: Email::parse("olena@example.com").expect("valid email"),
        balance,
        rewards: 0,
        language: Language::Uk,
    }
}
