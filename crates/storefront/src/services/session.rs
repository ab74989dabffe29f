//! Application session: the signed-in user, their cart and notifications.
//!
//! One `Session` exists per running app instance. Views borrow it to read
//! state and mutate it only through the methods here and on [`CartStore`].
//! Logging out ends the cart's lifetime along with the user's.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, instrument};

use quickgrub_core::NotificationKind;

use crate::cart::CartStore;
use crate::configurator::{ConfiguratorError, ItemConfigurator};
use crate::models::{ProfileUpdate, UserProfile};
use crate::services::notifications::{Notification, NotificationFeed};

/// Session-level errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no user is signed in")]
    NotAuthenticated,

    #[error("amount must be positive (got {0})")]
    InvalidAmount(Decimal),
}

/// State scoped to one user session.
#[derive(Debug, Default)]
pub struct Session {
    user: Option<UserProfile>,
    cart: CartStore,
    notifications: NotificationFeed,
}

impl Session {
    /// A guest session with an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign in. The guest cart is kept.
    #[instrument(skip_all, fields(email = %profile.email))]
    pub fn login(&mut self, profile: UserProfile) {
        info!("User signed in");
        self.user = Some(profile);
    }

    /// Sign out, dropping the profile and emptying the cart.
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!(email = %user.email, "User signed out");
        }
        self.cart.clear();
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub const fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// Apply a partial profile update.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotAuthenticated` when nobody is signed in.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<&UserProfile, SessionError> {
        let user = self.user.as_mut().ok_or(SessionError::NotAuthenticated)?;
        user.apply(update);
        Ok(user)
    }

    /// Add funds to the wallet and return the new balance.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotAuthenticated` when nobody is signed in and
    /// `SessionError::InvalidAmount` for zero or negative amounts.
    #[instrument(skip(self))]
    pub fn top_up_wallet(&mut self, amount: Decimal) -> Result<Decimal, SessionError> {
        if amount <= Decimal::ZERO {
            return Err(SessionError::InvalidAmount(amount));
        }
        let user = self.user.as_mut().ok_or(SessionError::NotAuthenticated)?;
        user.balance += amount;
        info!(balance = %user.balance, "Wallet topped up");
        self.notifications.push(Notification::new(
            NotificationKind::Payment,
            "Wallet Topped Up",
            format!("Added {amount} to your wallet."),
        ));
        Ok(user.balance)
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// Validate the dialog's selection and add the resulting line to the cart.
    ///
    /// # Errors
    ///
    /// Returns `ConfiguratorError::MissingRequired` when a required option is
    /// unselected; the cart is left untouched.
    pub fn add_to_cart(&mut self, configurator: &ItemConfigurator<'_>) -> Result<(), ConfiguratorError> {
        let line = configurator.validate()?.finalize();
        self.cart.add_item(line);
        Ok(())
    }

    #[must_use]
    pub const fn notifications(&self) -> &NotificationFeed {
        &self.notifications
    }

    pub const fn notifications_mut(&mut self) -> &mut NotificationFeed {
        &mut self.notifications
    }

    pub(crate) const fn user_mut(&mut self) -> Option<&mut UserProfile> {
        self.user.as_mut()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use quickgrub_core::{Email, Language, ProductId};

    use super::*;
    use crate::cart::LineItem;

    fn profile(balance_cents: i64) -> UserProfile {
        UserProfile {
            name: "Taras".to_string(),
            email: Email::parse("taras@example.com").unwrap(),
            balance: Decimal::new(balance_cents, 2),
            rewards: 0,
            language: Language::Uk,
        }
    }

    fn cola() -> LineItem {
        LineItem {
            id: ProductId::new("cola"),
            name: "Cola".to_string(),
            unit_price: Decimal::new(199, 2),
            quantity: 2,
            image: String::new(),
            customizations: None,
        }
    }

    #[test]
    fn test_logout_clears_user_and_cart() {
        let mut session = Session::new();
        session.login(profile(1000));
        session.cart_mut().add_item(cola());
        assert!(session.is_authenticated());

        session.logout();
        assert!(!session.is_authenticated());
        assert!(session.cart().is_empty());
        assert_eq!(session.cart().total_items(), 0);
    }

    #[test]
    fn test_guest_cart_survives_login() {
        let mut session = Session::new();
        session.cart_mut().add_item(cola());
        session.login(profile(0));
        assert_eq!(session.cart().total_items(), 2);
    }

    #[test]
    fn test_update_profile_requires_login() {
        let mut session = Session::new();
        assert_eq!(
            session.update_profile(ProfileUpdate::default()).unwrap_err(),
            SessionError::NotAuthenticated
        );

        session.login(profile(0));
        let updated = session
            .update_profile(ProfileUpdate {
                name: Some("Taras S.".to_string()),
                ..ProfileUpdate::default()
            })
            .unwrap();
        assert_eq!(updated.name, "Taras S.");
    }

    #[test]
    fn test_top_up_wallet() {
        let mut session = Session::new();
        assert_eq!(
            session.top_up_wallet(Decimal::TEN).unwrap_err(),
            SessionError::NotAuthenticated
        );

        session.login(profile(250));
        assert!(matches!(
            session.top_up_wallet(Decimal::ZERO),
            Err(SessionError::InvalidAmount(_))
        ));
        assert_eq!(session.top_up_wallet(Decimal::TEN).unwrap(), Decimal::new(1250, 2));
        assert_eq!(session.notifications().unread_count(), 1);
    }
}
