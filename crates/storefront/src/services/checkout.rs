//! Checkout: pricing the cart and turning it into an order.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, instrument, warn};

use quickgrub_core::{CurrencyCode, DeliveryMethod, NotificationKind, OrderId, OrderStatus, PaymentMethod};

use crate::cart::CartStore;
use crate::config::StorefrontConfig;
use crate::models::{Order, PriceBreakdown};
use crate::services::coupons::CouponBook;
use crate::services::notifications::Notification;
use crate::services::session::Session;

/// Reasons an order cannot be placed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("your cart is empty")]
    EmptyCart,

    #[error("unknown coupon code: {0}")]
    UnknownCoupon(String),

    #[error("coupon {code} needs an item total of at least {minimum}")]
    CouponNotApplicable { code: String, minimum: Decimal },

    #[error("insufficient wallet balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Decimal, available: Decimal },

    /// Wallet payment without a signed-in user.
    #[error("sign in to pay from your wallet")]
    NotAuthenticated,

    #[error("choose a delivery address")]
    MissingAddress,
}

/// Options picked on the checkout screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub delivery_method: DeliveryMethod,
    /// Required for delivery, ignored for pickup.
    #[serde(default)]
    pub delivery_address: Option<String>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub coupon_code: Option<String>,
}

impl CheckoutRequest {
    /// The trimmed delivery address, if one was given.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.delivery_address
            .as_deref()
            .map(str::trim)
            .filter(|address| !address.is_empty())
    }
}

/// Prices carts and places orders.
#[derive(Debug, Clone)]
pub struct Checkout {
    currency: CurrencyCode,
    delivery_fee: Decimal,
    coupons: CouponBook,
}

impl Checkout {
    #[must_use]
    pub const fn new(currency: CurrencyCode, delivery_fee: Decimal, coupons: CouponBook) -> Self {
        Self {
            currency,
            delivery_fee,
            coupons,
        }
    }

    /// Checkout using the configured currency and fee and the standard coupons.
    #[must_use]
    pub fn from_config(config: &StorefrontConfig) -> Self {
        Self::new(config.currency, config.delivery_fee, CouponBook::default())
    }

    #[must_use]
    pub const fn coupons(&self) -> &CouponBook {
        &self.coupons
    }

    /// Fee charged for the given delivery method.
    #[must_use]
    pub const fn delivery_fee(&self, method: DeliveryMethod) -> Decimal {
        match method {
            DeliveryMethod::Delivery => self.delivery_fee,
            DeliveryMethod::Pickup => Decimal::ZERO,
        }
    }

    /// Price the cart without placing anything.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::UnknownCoupon` or
    /// `CheckoutError::CouponNotApplicable` for a bad coupon code.
    pub fn quote(&self, cart: &CartStore, request: &CheckoutRequest) -> Result<PriceBreakdown, CheckoutError> {
        let item_total = cart.total_price();
        let delivery_fee = self.delivery_fee(request.delivery_method);
        let discount = match request.coupon_code.as_deref() {
            Some(code) => self
                .coupons
                .lookup(code)
                .ok_or_else(|| CheckoutError::UnknownCoupon(code.to_owned()))?
                .discount(item_total, delivery_fee)?,
            None => Decimal::ZERO,
        };
        Ok(PriceBreakdown::new(self.currency, item_total, delivery_fee, discount))
    }

    /// Place an order for everything in the session's cart.
    ///
    /// On success the wallet is debited (for wallet payments), the cart is
    /// cleared and order notifications are queued. On failure nothing
    /// changes.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError` for an empty cart, a delivery without an
    /// address, a bad coupon, a wallet payment without a signed-in user, or
    /// an insufficient balance.
    #[instrument(skip(self, session), fields(items = session.cart().total_items()))]
    pub fn place_order(&self, session: &mut Session, request: &CheckoutRequest) -> Result<Order, CheckoutError> {
        if session.cart().is_empty() {
            warn!("Rejected checkout of empty cart");
            return Err(CheckoutError::EmptyCart);
        }
        let delivery_address = match request.delivery_method {
            DeliveryMethod::Delivery => Some(request.address().ok_or(CheckoutError::MissingAddress)?.to_owned()),
            DeliveryMethod::Pickup => None,
        };
        let breakdown = self.quote(session.cart(), request)?;

        if request.payment_method == PaymentMethod::Wallet {
            let user = session.user_mut().ok_or(CheckoutError::NotAuthenticated)?;
            if user.balance < breakdown.total {
                warn!(needed = %breakdown.total, available = %user.balance, "Insufficient wallet balance");
                return Err(CheckoutError::InsufficientBalance {
                    needed: breakdown.total,
                    available: user.balance,
                });
            }
            user.balance -= breakdown.total;
        }

        let order = Order {
            id: OrderId::generate(),
            lines: session.cart().items().to_vec(),
            breakdown,
            delivery_method: request.delivery_method,
            delivery_address,
            payment_method: request.payment_method,
            coupon_code: request.coupon_code.clone(),
            status: OrderStatus::Placed,
            placed_at: Utc::now(),
        };
        session.cart_mut().clear();

        let total = breakdown.total_price();
        let feed = session.notifications_mut();
        feed.push(Notification::new(
            NotificationKind::Order,
            "Order Placed",
            format!("Your order #{} has been placed.", order.id),
        ));
        if request.payment_method != PaymentMethod::Cash {
            feed.push(Notification::new(
                NotificationKind::Payment,
                "Payment Successful",
                format!("Payment of {total} for order #{} was successful.", order.id),
            ));
        }

        info!(order_id = %order.id, total = %total, "Order placed");
        Ok(order)
    }
}
