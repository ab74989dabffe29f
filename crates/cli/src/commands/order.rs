//! `quickgrub order` - run a scripted order through cart and checkout.
//!
//! # Script format
//!
//! ```yaml
//! balance: "60.00"          # optional; signs in a demo user with this wallet balance
//! delivery_method: delivery # delivery | pickup
//! delivery_address: 123 Main Street, Apt 4B # required for delivery
//! payment_method: wallet    # wallet | card | cash
//! coupon_code: WELCOME20    # optional
//! lines:
//!   - product: classic-burger
//!     quantity: 2
//!     select:
//!       Size: large
//!       Add-ons: [cheese, bacon]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use quickgrub_core::{Email, Price, ProductId};
use quickgrub_storefront::catalog::Catalog;
use quickgrub_storefront::config::StorefrontConfig;
use quickgrub_storefront::configurator::ItemConfigurator;
use quickgrub_storefront::error::AppError;
use quickgrub_storefront::models::UserProfile;
use quickgrub_storefront::services::{Checkout, CheckoutRequest, Session};

use super::{CommandError, apply_choice, load_catalog, read_file};

/// A whole order script.
#[derive(Debug, Deserialize)]
pub struct OrderScript {
    #[serde(default)]
    pub balance: Option<Decimal>,
    #[serde(flatten)]
    pub checkout: CheckoutRequest,
    pub lines: Vec<ScriptLine>,
}

/// One product to configure and add.
#[derive(Debug, Deserialize)]
pub struct ScriptLine {
    pub product: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default)]
    pub select: BTreeMap<String, ScriptChoice>,
}

/// A single choice id or a list of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ScriptChoice {
    One(String),
    Many(Vec<String>),
}

const fn default_quantity() -> i64 {
    1
}

/// Run the script at `script_path` against the catalog and print the result.
pub async fn place(catalog_path: &Path, script_path: &Path) -> Result<(), CommandError> {
    let config = StorefrontConfig::from_env().map_err(AppError::from)?;
    let catalog = load_catalog(catalog_path).await?;
    let script: OrderScript = serde_yaml::from_str(&read_file(script_path).await?)?;

    let mut session = Session::new();
    if let Some(balance) = script.balance {
        session.login(demo_user(balance, &config)?);
    }
    fill_cart(&mut session, &catalog, &script.lines)?;
    info!(
        entries = session.cart().len(),
        items = session.cart().total_items(),
        "Cart filled from script"
    );

    let checkout = Checkout::from_config(&config);
    let order = checkout
        .place_order(&mut session, &script.checkout)
        .map_err(AppError::from)?;
    let currency = order.breakdown.currency;

    #[allow(clippy::print_stdout)]
    {
        println!("Order #{} ({})", order.id, order.status);
        if let Some(address) = &order.delivery_address {
            println!("  Deliver to {address}");
        }
        for line in &order.lines {
            println!(
                "  {:>3} x {:<24} {:>10}",
                line.quantity,
                line.name,
                Price::new(line.line_total(), currency)
            );
        }
        println!("  Item total   {:>10}", order.breakdown.item_total_price());
        println!("  Delivery fee {:>10}", Price::new(order.breakdown.delivery_fee, currency));
        if let Some(code) = &order.coupon_code {
            println!("  Discount ({code}) -{}", Price::new(order.breakdown.discount, currency));
        }
        println!("  Total        {:>10}", order.breakdown.total_price());
        if let Some(user) = session.user() {
            println!("  Wallet left  {:>10}", Price::new(user.balance, currency));
        }
    }
    Ok(())
}

/// Configure every script line and add it to the session cart.
fn fill_cart(session: &mut Session, catalog: &Catalog, lines: &[ScriptLine]) -> Result<(), CommandError> {
    for line in lines {
        let product = catalog
            .product(&ProductId::new(line.product.as_str()))
            .ok_or_else(|| AppError::NotFound(format!("product {}", line.product)))?;

        let mut configurator = ItemConfigurator::new(product);
        for (option, choice) in &line.select {
            match choice {
                ScriptChoice::One(id) => apply_choice(&mut configurator, option, id)?,
                ScriptChoice::Many(ids) => {
                    for id in ids {
                        apply_choice(&mut configurator, option, id)?;
                    }
                }
            }
        }
        configurator.set_quantity(line.quantity);
        session.add_to_cart(&configurator).map_err(AppError::from)?;
    }
    Ok(())
}

fn demo_user(balance: Decimal, config: &StorefrontConfig) -> Result<UserProfile, CommandError> {
    let email = Email::parse("guest@quickgrub.app")
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok(UserProfile {
        name: "Guest".to_string(),
        email,
        balance,
        rewards: 0,
        language: config.language,
    })
}
