//! Placed orders and their price breakdown.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use quickgrub_core::{CurrencyCode, DeliveryMethod, OrderId, OrderStatus, PaymentMethod, Price};

use crate::cart::LineItem;

/// What the customer pays, line by line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub currency: CurrencyCode,
    /// Sum of the cart lines.
    pub item_total: Decimal,
    pub delivery_fee: Decimal,
    /// Coupon discount, already capped to what it applies to.
    pub discount: Decimal,
    /// `item_total + delivery_fee - discount`, never below zero.
    pub total: Decimal,
}

impl PriceBreakdown {
    pub(crate) fn new(
        currency: CurrencyCode,
        item_total: Decimal,
        delivery_fee: Decimal,
        discount: Decimal,
    ) -> Self {
        let total = item_total
            .saturating_add(delivery_fee)
            .saturating_sub(discount)
            .max(Decimal::ZERO);
        Self {
            currency,
            item_total,
            delivery_fee,
            discount,
            total,
        }
    }

    #[must_use]
    pub const fn total_price(&self) -> Price {
        Price::new(self.total, self.currency)
    }

    #[must_use]
    pub const fn item_total_price(&self) -> Price {
        Price::new(self.item_total, self.currency)
    }
}

/// An order snapshot taken when the cart was checked out.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub lines: Vec<LineItem>,
    pub breakdown: PriceBreakdown,
    pub delivery_method: DeliveryMethod,
    /// Where the order goes. Always set for delivery, `None` for pickup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    pub payment_method: PaymentMethod,
    pub coupon_code: Option<String>,
    pub status: OrderStatus,
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Move the order one step along its timeline.
    ///
    /// Returns the new status. Delivered orders stay delivered.
    pub fn advance(&mut self) -> OrderStatus {
        if let Some(next) = self.status.next() {
            self.status = next;
        }
        self.status
    }

    /// Total number of units ordered.
    #[must_use]
    pub fn item_count(&self) -> i64 {
        self.lines
            .iter()
            .fold(0_i64, |acc, line| acc.saturating_add(line.quantity))
    }
}
