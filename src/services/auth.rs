//! Authentication actions: login, profile fetch/refresh, logout, startup
//! validation.
//!
//! DESIGN
//! ======
//! `fetch_profile` only reads: it never touches the session. Invalidation
//! is a separate policy (`refresh_profile`) so callers can fetch without
//! risking a logout. `login` is strictly sequential: the profile fetch
//! starts only after the token has been committed.
//!
//! ERROR HANDLING
//! ==============
//! Actions clean up at their boundary (clear the session where it can no
//! longer be trusted) and return the original error. `AuthError::payload`
//! hands the caller the remote body when there is one. Only
//! `initialize_auth` swallows errors: a failed startup validation simply
//! means starting anonymous.

use serde_json::{Value, json};

use crate::net::{ApiClient, ApiError};
use crate::state::{Role, Session, SessionStore};
use crate::storage::StorageError;

pub const GENERIC_LOGIN_FAILURE: &str = "Login failed. Please check your credentials and try again.";

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("no token available for profile fetch")]
    NoToken,

    #[error("login response did not contain an access token")]
    MissingAccessToken,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("session storage failed: {0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// The failure payload surfaced to callers: the remote structured body
    /// when the server rejected the call, otherwise `{"detail": <message>}`.
    #[must_use]
    pub fn payload(&self) -> Value {
        match self {
            Self::Api(ApiError::Rejected { body, .. }) => body.clone(),
            other => json!({ "detail": other.to_string() }),
        }
    }

    /// Message suitable for a login form: the remote `detail` string when
    /// present, otherwise a generic fallback.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(ApiError::Rejected { body, .. }) => match body.get("detail").and_then(Value::as_str) {
                Some(detail) => detail.to_owned(),
                None => GENERIC_LOGIN_FAILURE.to_owned(),
            },
            _ => GENERIC_LOGIN_FAILURE.to_owned(),
        }
    }

    /// Whether this failure means the stored session can no longer be
    /// trusted. Transport failures and local preconditions do not.
    #[must_use]
    pub fn invalidates_session(&self) -> bool {
        matches!(
            self,
            Self::MissingAccessToken | Self::Api(ApiError::Rejected { .. } | ApiError::Decode(_))
        )
    }
}

// =============================================================================
// CREDENTIALS
// =============================================================================

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// SERVICE
// =============================================================================

#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        self.client.session()
    }

    /// Exchange credentials for a token, commit it, then fetch and commit
    /// the profile. Returns the profile.
    ///
    /// # Errors
    ///
    /// Any failure clears the session for `role`, and for the role that was
    /// active before the attempt, before it is returned.
    pub async fn login(&self, role: Role, credentials: &Credentials) -> Result<Value, AuthError> {
        tracing::info!(%role, username = %credentials.username, "login attempt");
        let previous = self.session().role().await;
        match self.login_inner(role, credentials).await {
            Ok(profile) => {
                tracing::info!(%role, username = %credentials.username, "login succeeded");
                Ok(profile)
            }
            Err(e) => {
                match previous.filter(|previous| *previous != role) {
                    Some(previous) => self.session().clear_roles(&[role, previous]).await,
                    None => self.session().clear_auth(Some(role)).await,
                }
                tracing::warn!(%role, username = %credentials.username, error = %e, "login failed");
                Err(e)
            }
        }
    }

    async fn login_inner(&self, role: Role, credentials: &Credentials) -> Result<Value, AuthError> {
        let path = format!("{}/login/token", role.api_prefix());
        let response = self
            .client
            .post_form(
                &path,
                &[("username", credentials.username.as_str()), ("password", credentials.password.as_str())],
            )
            .await?;

        let token = response
            .get("access_token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingAccessToken)?
            .to_owned();

        self.session().set_token(token.clone(), role).await?;
        let profile = self.fetch_profile_for(role, &token).await?;
        self.session().set_user(profile.clone(), role).await?;
        Ok(profile)
    }

    /// Read the current profile from `/{role}/me`. Never mutates the session.
    /// Without a session role the superadmin endpoint is used.
    ///
    /// # Errors
    ///
    /// `NoToken` without a remote call when neither `token_override` nor a
    /// session token is available; otherwise the remote failure.
    pub async fn fetch_profile(&self, token_override: Option<&str>) -> Result<Value, AuthError> {
        let session = self.session().snapshot().await;
        let Some(token) = token_override.or(session.token()) else {
            return Err(AuthError::NoToken);
        };
        let role = session.role().unwrap_or(Role::SuperAdmin);
        self.fetch_profile_for(role, token).await
    }

    async fn fetch_profile_for(&self, role: Role, token: &str) -> Result<Value, AuthError> {
        let path = format!("{}/me", role.api_prefix());
        Ok(self.client.get_with_token(&path, token).await?)
    }

    /// Fetch the profile and commit it. When the failure means the session
    /// is no longer valid (rejected or garbled response), clear it first.
    ///
    /// # Errors
    ///
    /// Returns the original fetch failure.
    pub async fn refresh_profile(&self, token_override: Option<&str>) -> Result<Value, AuthError> {
        let role = self.session().role().await;
        match self.fetch_profile(token_override).await {
            Ok(profile) => {
                if let Some(role) = role {
                    self.session().set_user(profile.clone(), role).await?;
                }
                Ok(profile)
            }
            Err(e) => {
                if e.invalidates_session() {
                    tracing::info!(role = ?role, error = %e, "profile refresh rejected; clearing session");
                    self.session().clear_auth(role).await;
                }
                Err(e)
            }
        }
    }

    /// Clear the session and return the role that was active, so the caller
    /// can pick the matching login page.
    pub async fn logout(&self) -> Option<Role> {
        let role = self.session().role().await;
        self.session().clear_auth(role).await;
        tracing::info!(role = ?role, "logged out");
        role
    }

    /// Validate a restored session against the server. Never fails: a
    /// rejected token leaves the session cleared, anything else leaves it
    /// as it was.
    pub async fn initialize_auth(&self) {
        let Session::Authenticated { role, .. } = self.session().snapshot().await else {
            return;
        };
        match self.refresh_profile(None).await {
            Ok(_) => tracing::debug!(%role, "restored session validated"),
            Err(e) if e.invalidates_session() => {
                tracing::info!(%role, error = %e, "token validation failed during startup; session cleared");
            }
            Err(e) => {
                tracing::warn!(%role, error = %e, "could not validate restored session; keeping it");
            }
        }
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
