//! Newtype IDs for type-safe entity references.
//!
//! Catalog identifiers arrive from the remote menu API as opaque strings, so
//! the `define_id!` wrappers are string-backed. Orders are created locally and
//! use a random UUID instead.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to define a type-safe, string-backed ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `PartialOrd`, `Ord`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<&str>`, `From<String>` and `Display` implementations
///
/// `Ord` is derived so IDs can key ordered collections, which gives
/// order-independent equality for sets of choices.
///
/// # Example
///
/// ```rust
/// # use quickgrub_core::define_id;
/// define_id!(DishId);
/// define_id!(MenuId);
///
/// let dish = DishId::new("margherita");
/// let menu = MenuId::new("margherita");
///
/// assert_eq!(dish.as_str(), menu.as_str());
/// // These are different types, so this won't compile:
/// // let _: DishId = menu;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from anything string-like.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Catalog entity IDs
define_id!(ProductId);
define_id!(ChoiceId);
define_id!(CategoryId);
define_id!(RestaurantId);

/// Identifier of a placed order.
///
/// Generated locally at checkout time; never supplied by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Generate a fresh random order ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn test_string_id_roundtrips_through_json() {
        let id = ProductId::new("burger-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"burger-1\"");
        let back: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_choice_set_is_order_independent() {
        let a: BTreeSet<ChoiceId> = ["cheese", "bacon"].into_iter().map(ChoiceId::from).collect();
        let b: BTreeSet<ChoiceId> = ["bacon", "cheese"].into_iter().map(ChoiceId::from).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_order_ids_are_unique() {
        assert_ne!(OrderId::generate(), OrderId::generate());
    }

    #[test]
    fn test_display_uses_raw_value() {
        assert_eq!(CategoryId::new("pizza").to_string(), "pizza");
    }
}
