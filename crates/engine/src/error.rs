//! Engine error types.
//!
//! Three kinds of failure leave the engine, mirroring how each is handled at
//! the boundary:
//!
//! - `Parse` - a persisted value that cannot be defaulted away (e.g. a
//!   credential record). Recoverable blobs (cart, notifications, wallet) are
//!   instead replaced with their documented default at load time.
//! - `Store` - the persistence gateway failed; in-memory state is not rolled
//!   back automatically, the caller decides how to surface it.
//! - `Validation` - the operation was rejected before any mutation.
//!
//! No error here is fatal to the process.

use thiserror::Error;

use brewline_core::{EmailError, Money};

use crate::store::StoreError;

/// Application-level error type for the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A persisted value could not be parsed and has no safe default.
    #[error("stored value under {key:?} could not be parsed: {reason}")]
    Parse {
        /// Store key the value was read from.
        key: String,
        /// Human-readable parse failure.
        reason: String,
    },

    /// The persistence gateway failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The operation was rejected before any mutation occurred.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Password hashing or hash parsing failed.
    #[error("credential processing failed: {0}")]
    Credential(String),
}

/// Rejections that happen before any state is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Checkout was requested with a zero cart total.
    #[error("cart is empty")]
    EmptyCart,

    /// The wallet balance does not cover the cart total.
    #[error("insufficient funds: balance {balance} is below total {total}")]
    InsufficientFunds {
        /// Current wallet balance.
        balance: Money,
        /// Quoted cart total.
        total: Money,
    },

    /// Top-up amount must be strictly positive.
    #[error("top-up amount must be positive")]
    NonPositiveTopUp,

    /// A required profile field was left empty.
    #[error("profile field {0:?} is required")]
    MissingProfileField(&'static str),

    /// The email address is not structurally valid.
    #[error("invalid email: {0}")]
    Email(#[from] EmailError),

    /// The password does not meet the minimum length.
    #[error("password must be at least {min} characters")]
    WeakPassword {
        /// Minimum accepted length.
        min: usize,
    },

    /// Registration attempted with an email that already has an account.
    #[error("an account with this email already exists")]
    AccountExists,

    /// Login failed; deliberately does not say which part was wrong.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An operation that needs a session was called without one.
    #[error("no user is logged in")]
    NotLoggedIn,
}

/// Result type alias for [`EngineError`].
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        assert_eq!(ValidationError::EmptyCart.to_string(), "cart is empty");
        let err = ValidationError::InsufficientFunds {
            balance: Money::parse_loose("100"),
            total: Money::parse_loose("150"),
        };
        assert_eq!(
            err.to_string(),
            "insufficient funds: balance $100.00 is below total $150.00"
        );
    }

    #[test]
    fn test_validation_converts_into_engine_error() {
        let err: EngineError = ValidationError::EmptyCart.into();
        assert!(matches!(err, EngineError::Validation(_)));
    }
}
