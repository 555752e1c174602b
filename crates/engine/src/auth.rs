//! Authentication service.
//!
//! Accounts live in the same key-value store as everything else: one JSON
//! credential record per account, keyed by the raw email address (the key
//! layout the original app used), plus a `loggedInUser` key naming the
//! active session. Passwords are stored as argon2 hashes, never verbatim.

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde::{Deserialize, Serialize};

use brewline_core::Email;

use crate::error::{EngineError, Result, ValidationError};
use crate::store::{self, KeyValueStore, keys};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Persisted credential record.
#[derive(Debug, Serialize, Deserialize)]
struct StoredCredentials {
    email: Email,
    password_hash: String,
}

/// Registration, login, and session state.
pub struct AuthService<S> {
    store: Arc<S>,
}

impl<S> Clone for AuthService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: KeyValueStore> AuthService<S> {
    pub(crate) fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Email`] for a malformed address,
    /// [`ValidationError::WeakPassword`] for a short password, and
    /// [`ValidationError::AccountExists`] for a duplicate registration -
    /// all before anything is written.
    pub async fn register(&self, email: &str, password: &str) -> Result<Email> {
        let email = Email::parse(email).map_err(ValidationError::from)?;
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::WeakPassword {
                min: MIN_PASSWORD_LENGTH,
            }
            .into());
        }
        if self.store.get(email.as_str()).await?.is_some() {
            return Err(ValidationError::AccountExists.into());
        }

        let record = StoredCredentials {
            email: email.clone(),
            password_hash: hash_password(password)?,
        };
        store::set_json(&*self.store, email.as_str(), &record).await?;
        tracing::info!(%email, "account registered");
        Ok(email)
    }

    /// Log in, marking the account as the active session.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidCredentials`] for an unknown
    /// account or a wrong password; which of the two is never disclosed.
    pub async fn login(&self, email: &str, password: &str) -> Result<Email> {
        let email =
            Email::parse(email).map_err(|_| ValidationError::InvalidCredentials)?;
        let raw = self
            .store
            .get(email.as_str())
            .await?
            .ok_or(ValidationError::InvalidCredentials)?;
        let record: StoredCredentials =
            serde_json::from_str(&raw).map_err(|err| EngineError::Parse {
                key: email.to_string(),
                reason: err.to_string(),
            })?;

        verify_password(password, &record.password_hash)?;
        self.store
            .set(keys::LOGGED_IN_USER, email.as_str())
            .await?;
        tracing::info!(%email, "login");
        Ok(email)
    }

    /// End the active session. A missing session is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngineError::Store`] if the gateway fails.
    pub async fn logout(&self) -> Result<()> {
        self.store.remove(keys::LOGGED_IN_USER).await?;
        Ok(())
    }

    /// Email of the active session, if any.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngineError::Store`] if the gateway fails.
    pub async fn current_user(&self) -> Result<Option<Email>> {
        let Some(raw) = self.store.get(keys::LOGGED_IN_USER).await? else {
            return Ok(None);
        };
        match Email::parse(&raw) {
            Ok(email) => Ok(Some(email)),
            Err(err) => {
                tracing::warn!(%err, "discarding malformed session value");
                Ok(None)
            }
        }
    }
}

/// Hash a password for storage.
fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| EngineError::Credential(err.to_string()))
}

/// Verify a password against a stored hash.
fn verify_password(password: &str, hash: &str) -> Result<()> {
    let parsed = PasswordHash::new(hash).map_err(|err| EngineError::Credential(err.to_string()))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| ValidationError::InvalidCredentials.into())
}
