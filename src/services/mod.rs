//! Domain services over the panel REST API.
//!
//! DESIGN
//! ======
//! `auth` composes the session store and the API client into the login /
//! profile / logout actions. `superadmin` and `admin` are pure pass-through
//! call wrappers: one function per endpoint, no validation, no caching, and
//! the response body is returned exactly as received.

pub mod admin;
pub mod auth;
pub mod superadmin;
pub mod types;

pub use admin::AdminService;
pub use auth::{AuthError, AuthService, Credentials};
pub use superadmin::SuperadminService;

/// Pagination passed through verbatim as `?skip=&limit=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Page {
    pub const DEFAULT_LIMIT: u32 = 100;
    pub const PAYMENT_LOG_LIMIT: u32 = 20;

    #[must_use]
    pub fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }

    /// Default page for payment history (`limit=20`).
    #[must_use]
    pub fn payment_logs() -> Self {
        Self { skip: 0, limit: Self::PAYMENT_LOG_LIMIT }
    }

    fn query(self) -> [(&'static str, String); 2] {
        [("skip", self.skip.to_string()), ("limit", self.limit.to_string())]
    }
}

impl Default for Page {
    fn default() -> Self {
        Self { skip: 0, limit: Self::DEFAULT_LIMIT }
    }
}
