//! Promotional coupon codes.

use rust_decimal::Decimal;
use serde::Serialize;

use super::checkout::CheckoutError;

/// How a coupon reduces the bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum CouponRule {
    /// Percentage off the item total.
    PercentOff { percent: Decimal },
    /// Waives the delivery fee once the item total reaches the minimum.
    FreeDelivery { min_item_total: Decimal },
    /// Fixed amount off once the item total reaches the minimum.
    FlatOff {
        amount: Decimal,
        min_item_total: Decimal,
    },
}

/// A redeemable coupon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coupon {
    pub code: String,
    pub description: String,
    pub rule: CouponRule,
}

impl Coupon {
    #[must_use]
    pub fn new(code: impl Into<String>, description: impl Into<String>, rule: CouponRule) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            rule,
        }
    }

    /// Discount this coupon gives on an order.
    ///
    /// The result is never negative and never exceeds the amount it is
    /// taken from.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::CouponNotApplicable` when the item total is
    /// below the coupon's minimum.
    pub fn discount(&self, item_total: Decimal, delivery_fee: Decimal) -> Result<Decimal, CheckoutError> {
        let discount = match self.rule {
            CouponRule::PercentOff { percent } => (item_total * percent / Decimal::ONE_HUNDRED).round_dp(2),
            CouponRule::FreeDelivery { min_item_total } => {
                self.check_minimum(item_total, min_item_total)?;
                delivery_fee
            }
            CouponRule::FlatOff {
                amount,
                min_item_total,
            } => {
                self.check_minimum(item_total, min_item_total)?;
                amount.min(item_total)
            }
        };
        Ok(discount.max(Decimal::ZERO))
    }

    fn check_minimum(&self, item_total: Decimal, minimum: Decimal) -> Result<(), CheckoutError> {
        if item_total < minimum {
            return Err(CheckoutError::CouponNotApplicable {
                code: self.code.clone(),
                minimum,
            });
        }
        Ok(())
    }
}

/// The set of coupons a checkout accepts.
#[derive(Debug, Clone)]
pub struct CouponBook {
    coupons: Vec<Coupon>,
}

impl CouponBook {
    #[must_use]
    pub const fn new(coupons: Vec<Coupon>) -> Self {
        Self { coupons }
    }

    /// Find a coupon by code, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn lookup(&self, code: &str) -> Option<&Coupon> {
        let code = code.trim();
        self.coupons
            .iter()
            .find(|coupon| coupon.code.eq_ignore_ascii_case(code))
    }

    #[must_use]
    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }
}

impl Default for CouponBook {
    /// The promotions offered in the app.
    fn default() -> Self {
        Self::new(vec![
            Coupon::new(
                "WELCOME20",
                "20% off for new users on their first order",
                CouponRule::PercentOff {
                    percent: Decimal::from(20),
                },
            ),
            Coupon::new(
                "FREESHIP",
                "Free delivery on orders above 15",
                CouponRule::FreeDelivery {
                    min_item_total: Decimal::from(15),
                },
            ),
            Coupon::new(
                "SUMMER10",
                "10 off on orders above 50",
                CouponRule::FlatOff {
                    amount: Decimal::from(10),
                    min_item_total: Decimal::from(50),
                },
            ),
        ])
    }
}
