//! `quickgrub quote` - price one configured product.

use std::path::Path;

use quickgrub_core::{Price, ProductId};
use quickgrub_storefront::config::StorefrontConfig;
use quickgrub_storefront::configurator::ItemConfigurator;
use quickgrub_storefront::error::AppError;

use super::{CommandError, apply_choice, load_catalog, parse_selection};

/// Configure `product_id` with the given selections and print its price.
pub async fn price(
    catalog_path: &Path,
    product_id: &str,
    selections: &[String],
    quantity: i64,
) -> Result<(), CommandError> {
    let config = StorefrontConfig::from_env().map_err(AppError::from)?;
    let catalog = load_catalog(catalog_path).await?;
    let product = catalog
        .product(&ProductId::new(product_id))
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    let mut configurator = ItemConfigurator::new(product);
    for raw in selections {
        let (option, choice) = parse_selection(raw)?;
        apply_choice(&mut configurator, option, choice)?;
    }
    configurator.set_quantity(quantity);

    let line = configurator.validate().map_err(AppError::from)?.finalize();
    let currency = config.currency;

    #[allow(clippy::print_stdout)]
    {
        println!("{} x{}", line.name, line.quantity);
        println!("  unit price:  {}", Price::new(line.unit_price, currency));
        println!("  total price: {}", Price::new(configurator.total_price(), currency));
    }
    Ok(())
}
