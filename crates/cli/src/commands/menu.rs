//! `quickgrub menu` - list products from a catalog.

use std::path::Path;

use quickgrub_core::{CategoryId, Price, RestaurantId};
use quickgrub_storefront::catalog::{Catalog, MenuFilter, Product, Restaurant};
use quickgrub_storefront::config::StorefrontConfig;
use quickgrub_storefront::error::AppError;

use super::{CommandError, load_catalog};

/// Print the products matching the filters, one per line.
///
/// With a restaurant, its summary is printed first; otherwise every
/// restaurant in the catalog is listed above the products.
pub async fn list(
    catalog_path: &Path,
    restaurant: Option<&str>,
    category: Option<&str>,
    search: Option<&str>,
) -> Result<(), CommandError> {
    let currency = StorefrontConfig::from_env().map_err(AppError::from)?.currency;
    let catalog = load_catalog(catalog_path).await?;
    let restaurant = restaurant.map(RestaurantId::new);
    let category = category.map(CategoryId::new);
    let (restaurants, products) = select(&catalog, restaurant.as_ref(), category.as_ref(), search)?;

    #[allow(clippy::print_stdout)]
    {
        for restaurant in &restaurants {
            println!("{}", restaurant.summary());
        }
        if !restaurants.is_empty() {
            println!();
        }
        if products.is_empty() {
            println!("No products match.");
        }
        for product in products {
            let price = Price::new(product.base_price, currency);
            println!("{:<20} {:<28} {:>8}", product.id, product.name, price);
            for option in &product.options {
                let marker = if option.required { " (required)" } else { "" };
                let choices: Vec<&str> = option.choices.iter().map(|c| c.id.as_str()).collect();
                println!("    {}{marker}: {}", option.name, choices.join(", "));
            }
        }
    }
    Ok(())
}

/// Restaurants to show in the header and the products to list.
fn select<'c>(
    catalog: &'c Catalog,
    restaurant: Option<&RestaurantId>,
    category: Option<&CategoryId>,
    search: Option<&str>,
) -> Result<(Vec<&'c Restaurant>, Vec<&'c Product>), CommandError> {
    let restaurants = match restaurant {
        Some(id) => vec![
            catalog
                .restaurant(id)
                .ok_or_else(|| AppError::NotFound(format!("restaurant {id}")))?,
        ],
        None => catalog.restaurants().iter().collect(),
    };
    let products = catalog.filter(&MenuFilter {
        restaurant,
        category,
        query: search,
    });
    Ok((restaurants, products))
}
