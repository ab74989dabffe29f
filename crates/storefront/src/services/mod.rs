//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `session` - Signed-in user, wallet and the session's cart
//! - `checkout` - Pricing the cart and placing orders
//! - `coupons` - Promotional codes applied at checkout
//! - `notifications` - In-app notification feed

pub mod checkout;
pub mod coupons;
pub mod notifications;
pub mod session;

pub use checkout::{Checkout, CheckoutError, CheckoutRequest};
pub use coupons::{Coupon, CouponBook, CouponRule};
pub use notifications::{Notification, NotificationFeed};
pub use session::{Session, SessionError};
