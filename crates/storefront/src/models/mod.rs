//! Domain models for the storefront.
//!
//! Plain data carried between the session, checkout and tracking code.

pub mod order;
pub mod user;

pub use order::{Order, PriceBreakdown};
pub use user::{ProfileUpdate, UserProfile};
