//! User profile service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use brewline_core::Email;

use crate::error::{Result, ValidationError};
use crate::store::{self, KeyValueStore, keys};

/// Profile fields shown on the account screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Avatar image reference; empty means "use the placeholder".
    #[serde(default)]
    pub avatar: String,
}

/// Reads and validated writes of the single persisted profile.
pub struct ProfileService<S> {
    store: Arc<S>,
}

impl<S> Clone for ProfileService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: KeyValueStore> ProfileService<S> {
    pub(crate) fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Load the stored profile; absent or malformed reads as `None`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngineError::Store`] if the gateway read fails.
    pub async fn load(&self) -> Result<Option<UserProfile>> {
        let Some(raw) = self.store.get(keys::USER_PROFILE).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(profile) => Ok(Some(profile)),
            Err(err) => {
                tracing::warn!(key = keys::USER_PROFILE, %err, "discarding malformed value");
                Ok(None)
            }
        }
    }

    /// Validate and persist the profile, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingProfileField`] if name, email, or
    /// phone is blank, [`ValidationError::Email`] if the address is
    /// malformed, or [`crate::EngineError::Store`] if persisting fails.
    pub async fn save(&self, profile: &UserProfile) -> Result<()> {
        if profile.name.trim().is_empty() {
            return Err(ValidationError::MissingProfileField("name").into());
        }
        if profile.email.trim().is_empty() {
            return Err(ValidationError::MissingProfileField("email").into());
        }
        if profile.phone.trim().is_empty() {
            return Err(ValidationError::MissingProfileField("phone").into());
        }
        Email::parse(&profile.email).map_err(ValidationError::from)?;

        store::set_json(&*self.store, keys::USER_PROFILE, profile).await?;
        tracing::info!(name = %profile.name, "profile saved");
        Ok(())
    }

    /// Delete the stored profile; already-absent is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngineError::Store`] if the gateway fails.
    pub async fn clear(&self) -> Result<()> {
        self.store.remove(keys::USER_PROFILE).await?;
        Ok(())
    }
}
