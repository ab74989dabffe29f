//! Status and choice enums shared by checkout, tracking and notifications.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Progress of a placed order.
///
/// Orders only ever move forward: `Placed -> Preparing -> OnTheWay -> Delivered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Placed,
    Preparing,
    OnTheWay,
    Delivered,
}

impl OrderStatus {
    /// The status that follows this one, or `None` once delivered.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Placed => Some(Self::Preparing),
            Self::Preparing => Some(Self::OnTheWay),
            Self::OnTheWay => Some(Self::Delivered),
            Self::Delivered => None,
        }
    }

    /// Human-readable label used by the tracking timeline.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Placed => "Order Placed",
            Self::Preparing => "Preparing",
            Self::OnTheWay => "On the way",
            Self::Delivered => "Delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How the order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    #[default]
    Delivery,
    Pickup,
}

/// How the order is paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Prepaid in-app balance.
    #[default]
    Wallet,
    Card,
    /// Cash on delivery.
    Cash,
}

/// Notification tab a message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Order,
    Promo,
    Payment,
    Gift,
}
