//! QuickGrub Core - Shared types library.
//!
//! This crate provides common types used across all QuickGrub components:
//! - `storefront` - Cart, item configuration, checkout and session logic
//! - `cli` - Command-line front end for browsing a menu and placing orders
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients,
//! no global state. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, emails, languages and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
