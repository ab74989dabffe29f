//! Unified error handling.
//!
//! Each module reports its own error type; `AppError` wraps them so callers
//! driving several modules (the CLI, an embedding UI) can use one `Result`.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::configurator::ConfiguratorError;
use crate::services::checkout::CheckoutError;
use crate::services::session::SessionError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog data was malformed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Product selection was invalid or incomplete.
    #[error("Configuration error: {0}")]
    Configurator(#[from] ConfiguratorError),

    /// Order could not be placed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Session operation failed.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad input from the caller.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether the user can fix this by changing their input.
    ///
    /// Everything except malformed configuration or catalog data is.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        !matches!(self, Self::Config(_) | Self::Catalog(_))
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
