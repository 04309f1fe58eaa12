use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Global storage key holding the active role marker.
pub const ROLE_KEY: &str = "user_role";

/// Account kind. Decides which login endpoint, dashboard and API surface a
/// session may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    SuperAdmin,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role `{0}` (expected `superadmin` or `admin`)")]
pub struct UnknownRole(pub String);

impl Role {
    pub const ALL: [Self; 2] = [Self::SuperAdmin, Self::Admin];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "superadmin",
            Self::Admin => "admin",
        }
    }

    /// Parse a stored role marker. Unrecognized markers yield `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == raw.trim())
    }

    #[must_use]
    pub fn token_key(self) -> String {
        format!("{}_token", self.as_str())
    }

    #[must_use]
    pub fn user_info_key(self) -> String {
        format!("{}_user_info", self.as_str())
    }

    /// API path prefix for the role's auth endpoints (`/superadmin`, `/admin`).
    #[must_use]
    pub fn api_prefix(self) -> &'static str {
        match self {
            Self::SuperAdmin => "/superadmin",
            Self::Admin => "/admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownRole(s.to_owned()))
    }
}

#[cfg(test)]
#[path = "role_test.rs"]
mod tests;
