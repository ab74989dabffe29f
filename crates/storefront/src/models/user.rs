//! User profile types.
//!
//! The authentication flow itself lives outside this crate; it hands a
//! [`UserProfile`] to [`crate::services::session::Session::login`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use quickgrub_core::{Email, Language};

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name.
    pub name: String,
    /// Contact email address.
    pub email: Email,
    /// Prepaid wallet balance.
    pub balance: Decimal,
    /// Loyalty points.
    #[serde(default)]
    pub rewards: u32,
    /// Preferred interface language.
    #[serde(default)]
    pub language: Language,
}

/// Partial profile update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub rewards: Option<u32>,
    pub language: Option<Language>,
}

impl UserProfile {
    /// Apply the fields present in `update`.
    ///
    /// The wallet balance is not part of a profile update; it only changes
    /// through top-ups and wallet payments.
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(rewards) = update.rewards {
            self.rewards = rewards;
        }
        if let Some(language) = update.language {
            self.language = language;
        }
    }
}
