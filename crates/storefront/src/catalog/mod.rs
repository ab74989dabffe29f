//! Read-only menu catalog.
//!
//! The catalog is fetched by the UI layer (categories, restaurants, products)
//! and handed to this crate as JSON. Loading validates the invariants the
//! configurator relies on: option names are unique per product, choice ids
//! are unique per option, and no price is negative. Products may point at a
//! restaurant, which must then exist.

mod types;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use quickgrub_core::{CategoryId, ProductId, RestaurantId};

pub use types::{Category, Choice, OptionKind, Product, ProductOption, Restaurant};

/// Category id the menu uses for its "All" tab.
pub const ALL_CATEGORY: &str = "all";

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate product id: {0}")]
    DuplicateProduct(ProductId),

    #[error("product {product} has more than one option named {option:?}")]
    DuplicateOption { product: ProductId, option: String },

    #[error("option {option:?} on product {product} repeats choice {choice}")]
    DuplicateChoice {
        product: ProductId,
        option: String,
        choice: String,
    },

    #[error("option {option:?} on product {product} has no choices")]
    NoChoices { product: ProductId, option: String },

    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),

    #[error("duplicate restaurant id: {0}")]
    DuplicateRestaurant(RestaurantId),

    #[error("restaurant {0} has a rating outside 0-5")]
    InvalidRating(RestaurantId),

    #[error("product {product} belongs to unknown restaurant {restaurant}")]
    UnknownRestaurant {
        product: ProductId,
        restaurant: RestaurantId,
    },
}

/// Which products [`Catalog::filter`] returns. Every field left `None`
/// matches everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct MenuFilter<'a> {
    pub restaurant: Option<&'a RestaurantId>,
    /// [`ALL_CATEGORY`] is the same as `None`.
    pub category: Option<&'a CategoryId>,
    /// Case-insensitive search on name and description.
    pub query: Option<&'a str>,
}

/// Categories, restaurants and products available to order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    restaurants: Vec<Restaurant>,
    #[serde(default)]
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from already-fetched records.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if a restaurant, product, option or choice is
    /// duplicated, an option has no choices, any price is negative, a rating
    /// is out of range, or a product names an unknown restaurant.
    pub fn new(
        categories: Vec<Category>,
        restaurants: Vec<Restaurant>,
        products: Vec<Product>,
    ) -> Result<Self, CatalogError> {
        let catalog = Self {
            categories,
            restaurants,
            products,
        };
        catalog.validate()?;
        debug!(
            categories = catalog.categories.len(),
            restaurants = catalog.restaurants.len(),
            products = catalog.products.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// Parse a catalog document of the form
    /// `{"categories": [...], "restaurants": [...], "products": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed JSON and the validation
    /// errors of [`Catalog::new`] otherwise.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: Self = serde_json::from_str(json)?;
        Self::new(raw.categories, raw.restaurants, raw.products)
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    /// Look up a restaurant by id.
    #[must_use]
    pub fn restaurant(&self, id: &RestaurantId) -> Option<&Restaurant> {
        self.restaurants.iter().find(|restaurant| &restaurant.id == id)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// Products matching every field of `filter`, in catalog order.
    ///
    /// The [`ALL_CATEGORY`] id matches every category; a blank query matches
    /// every product.
    #[must_use]
    pub fn filter(&self, filter: &MenuFilter<'_>) -> Vec<&Product> {
        let category = filter.category.filter(|c| c.as_str() != ALL_CATEGORY);
        let needle = filter
            .query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        self.products
            .iter()
            .filter(|p| filter.restaurant.is_none_or(|r| p.restaurant_id.as_ref() == Some(r)))
            .filter(|p| category.is_none_or(|c| p.category_id.as_ref() == Some(c)))
            .filter(|p| needle.as_deref().is_none_or(|n| p.matches_query(n)))
            .collect()
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut restaurant_ids = HashSet::new();
        for restaurant in &self.restaurants {
            if !restaurant_ids.insert(&restaurant.id) {
                return Err(CatalogError::DuplicateRestaurant(restaurant.id.clone()));
            }
            if restaurant.rating.is_sign_negative() || restaurant.rating > Restaurant::MAX_RATING {
                return Err(CatalogError::InvalidRating(restaurant.id.clone()));
            }
        }

        let mut product_ids = HashSet::new();
        for product in &self.products {
            if !product_ids.insert(&product.id) {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
            if let Some(restaurant) = &product.restaurant_id
                && !restaurant_ids.contains(restaurant)
            {
                return Err(CatalogError::UnknownRestaurant {
                    product: product.id.clone(),
                    restaurant: restaurant.clone(),
                });
            }
            if product.base_price.is_sign_negative() {
                return Err(CatalogError::NegativePrice(product.id.clone()));
            }

            let mut option_names = HashSet::new();
            for option in &product.options {
                if !option_names.insert(option.name.as_str()) {
                    return Err(CatalogError::DuplicateOption {
                        product: product.id.clone(),
                        option: option.name.clone(),
                    });
                }
                if option.choices.is_empty() {
                    return Err(CatalogError::NoChoices {
                        product: product.id.clone(),
                        option: option.name.clone(),
                    });
                }

                let mut choice_ids = HashSet::new();
                for choice in &option.choices {
                    if !choice_ids.insert(&choice.id) {
                        return Err(CatalogError::DuplicateChoice {
                            product: product.id.clone(),
                            option: option.name.clone(),
                            choice: choice.id.to_string(),
                        });
                    }
                    if choice.price_delta.is_sign_negative() {
                        return Err(CatalogError::NegativePrice(product.id.clone()));
                    }
                }
            }
        }
        Ok(())
    }
}
