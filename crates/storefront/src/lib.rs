//! QuickGrub Storefront library.
//!
//! The ordering engine behind the QuickGrub app: a session-scoped cart,
//! the product configuration dialog, checkout and order tracking. All state
//! is in memory and every operation is synchronous; fetching the catalog and
//! rendering it are left to the embedding UI.
//!
//! # Data flow
//!
//! [`configurator::ItemConfigurator`] (one per open product) produces a
//! [`cart::LineItem`], which [`cart::CartStore::add_item`] merges into the
//! session cart. [`services::Checkout`] prices the cart and turns it into a
//! [`models::Order`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod configurator;
pub mod error;
pub mod models;
pub mod services;
