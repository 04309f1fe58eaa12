//! Session value and the shared store that owns it.
//!
//! DESIGN
//! ======
//! `Session` makes the token/role pairing structural: a role without a
//! token (or a profile without either) cannot be represented.
//!
//! `SessionStore` is a cheap-to-clone handle passed to whoever needs it
//! (HTTP adapter, auth actions, console). Mutation goes only through
//! `set_token`, `set_user` and `clear_auth`; each updates memory first and
//! then mirrors the change into durable storage. The lock is never held
//! across storage or network I/O.
//!
//! STORAGE LAYOUT
//! ==============
//! `{role}_token`      bearer token
//! `{role}_user_info`  profile JSON
//! `user_role`         active role marker (global)

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use super::role::{ROLE_KEY, Role};
use crate::storage::{DurableStorage, StorageError};

// =============================================================================
// SESSION
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated {
        token: String,
        role: Role,
        /// Role-specific profile as returned by `/{role}/me`. `None` until fetched.
        profile: Option<Value>,
    },
}

impl Session {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Authenticated { token, .. } => Some(token),
            Self::Anonymous => None,
        }
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Authenticated { role, .. } => Some(*role),
            Self::Anonymous => None,
        }
    }

    #[must_use]
    pub fn profile(&self) -> Option<&Value> {
        match self {
            Self::Authenticated { profile, .. } => profile.as_ref(),
            Self::Anonymous => None,
        }
    }
}

// =============================================================================
// STORE
// =============================================================================

#[derive(Clone)]
pub struct SessionStore {
    state: Arc<RwLock<Session>>,
    storage: Arc<dyn DurableStorage>,
}

impl SessionStore {
    /// An anonymous store writing to `storage`. Does not read existing keys;
    /// see [`SessionStore::restore`].
    #[must_use]
    pub fn new(storage: Arc<dyn DurableStorage>) -> Self {
        Self { state: Arc::new(RwLock::new(Session::Anonymous)), storage }
    }

    /// Rebuild the session persisted in `storage`.
    ///
    /// An unrecognized role marker or a missing token yields an anonymous
    /// session. An unparseable profile is dropped but the token is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    pub fn restore(storage: Arc<dyn DurableStorage>) -> Result<Self, StorageError> {
        let session = load_persisted(storage.as_ref())?;
        if let Some(role) = session.role() {
            tracing::debug!(%role, has_profile = session.profile().is_some(), "restored persisted session");
        }
        Ok(Self { state: Arc::new(RwLock::new(session)), storage })
    }

    pub async fn snapshot(&self) -> Session {
        self.state.read().await.clone()
    }

    pub async fn token(&self) -> Option<String> {
        self.state.read().await.token().map(str::to_owned)
    }

    pub async fn role(&self) -> Option<Role> {
        self.state.read().await.role()
    }

    pub async fn profile(&self) -> Option<Value> {
        self.state.read().await.profile().cloned()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated()
    }

    /// Commit a freshly issued token for `role`. Any profile held for a
    /// previous token is dropped, and switching roles removes the previous
    /// role's keys. The token is not inspected.
    ///
    /// # Errors
    ///
    /// Returns an error if the token or role marker cannot be persisted.
    /// Memory is already updated at that point.
    pub async fn set_token(&self, token: String, role: Role) -> Result<(), StorageError> {
        let previous = {
            let mut state = self.state.write().await;
            let previous = state.role();
            *state = Session::Authenticated { token: token.clone(), role, profile: None };
            previous
        };
        if let Some(previous) = previous.filter(|previous| *previous != role) {
            self.remove_keys(&[previous]);
        }
        self.storage.set_item(&role.token_key(), &token)?;
        self.storage.set_item(ROLE_KEY, role.as_str())?;
        Ok(())
    }

    /// Commit the profile for the current token. Ignored when there is no
    /// token or when `role` is not the session's role.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be encoded or persisted.
    pub async fn set_user(&self, profile: Value, role: Role) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(&profile).map_err(|e| StorageError::Encode(e.to_string()))?;
        {
            let mut state = self.state.write().await;
            match &mut *state {
                Session::Authenticated { role: current, profile: slot, .. } if *current == role => {
                    *slot = Some(profile);
                }
                other => {
                    tracing::warn!(%role, active = ?other.role(), "set_user without a matching token; ignored");
                    return Ok(());
                }
            }
        }
        self.storage.set_item(&role.user_info_key(), &encoded)
    }

    /// Drop the session. `Some(role)` removes that role's keys; `None`
    /// removes the keys of every known role. The role marker is always
    /// removed and memory always ends anonymous, even if storage fails.
    pub async fn clear_auth(&self, role: Option<Role>) {
        match role {
            Some(role) => self.clear_roles(&[role]).await,
            None => self.clear_roles(&Role::ALL).await,
        }
    }

    /// `clear_auth` over an explicit set of roles.
    pub async fn clear_roles(&self, roles: &[Role]) {
        {
            let mut state = self.state.write().await;
            *state = Session::Anonymous;
        }
        self.remove_keys(roles);
        if let Err(e) = self.storage.remove_item(ROLE_KEY) {
            tracing::warn!(key = ROLE_KEY, error = %e, "failed to remove session key");
        }
        tracing::debug!(roles = ?roles, "session cleared");
    }

    fn remove_keys(&self, roles: &[Role]) {
        for key in roles.iter().flat_map(|role| [role.token_key(), role.user_info_key()]) {
            if let Err(e) = self.storage.remove_item(&key) {
                tracing::warn!(%key, error = %e, "failed to remove session key");
            }
        }
    }
}

fn load_persisted(storage: &dyn DurableStorage) -> Result<Session, StorageError> {
    let Some(marker) = storage.get_item(ROLE_KEY)? else {
        return Ok(Session::Anonymous);
    };
    let Some(role) = Role::parse(&marker) else {
        tracing::warn!(%marker, "ignoring persisted session with unrecognized role");
        return Ok(Session::Anonymous);
    };
    let Some(token) = storage.get_item(&role.token_key())?.filter(|t| !t.is_empty()) else {
        return Ok(Session::Anonymous);
    };

    let profile = match storage.get_item(&role.user_info_key())? {
        Some(raw) => match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Null) => None,
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(%role, error = %e, "dropping unparseable persisted profile");
                None
            }
        },
        None => None,
    };

    Ok(Session::Authenticated { token, role, profile })
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
