//! Static route table and path resolution.
//!
//! DESIGN
//! ======
//! Routes are a fixed two-level tree: dashboard layouts carry the auth
//! metadata and their children inherit it. A matched child's effective
//! metadata ORs the flags of every matched record; `user_type` comes from
//! the deepest record that sets one. Metadata is never mutated.
//!
//! Record redirects (`/` by role, dashboard root to its home page) are part
//! of the table; guard redirects live in `guard`.

use std::fmt;

use reqwest::Url;

use crate::state::Role;

// =============================================================================
// NAMES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    Root,
    SuperAdminLogin,
    SuperAdminDashboard,
    SaDashboardHome,
    SaManageAdmins,
    SaManagePlans,
    AdminLogin,
    AdminDashboard,
    AdminDashboardHome,
    AdminViewPlans,
    AdminManageUsers,
    AdminRecharge,
    PaymentSuccess,
    PaymentFailed,
    NotFound,
}

impl RouteName {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Root => "Root",
            Self::SuperAdminLogin => "SuperAdminLogin",
            Self::SuperAdminDashboard => "SuperAdminDashboard",
            Self::SaDashboardHome => "SADashboardHome",
            Self::SaManageAdmins => "SAManageAdmins",
            Self::SaManagePlans => "SAManagePlans",
            Self::AdminLogin => "AdminLogin",
            Self::AdminDashboard => "AdminDashboard",
            Self::AdminDashboardHome => "AdminDashboardHome",
            Self::AdminViewPlans => "AdminViewPlans",
            Self::AdminManageUsers => "AdminManageUsers",
            Self::AdminRecharge => "AdminRecharge",
            Self::PaymentSuccess => "PaymentSuccess",
            Self::PaymentFailed => "PaymentFailed",
            Self::NotFound => "NotFound",
        }
    }

    /// Canonical path. `NotFound` has no table entry; any unmatched path
    /// (including `/404`) resolves to it.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Root => "/",
            Self::SuperAdminLogin => "/superadmin/login",
            Self::SuperAdminDashboard => "/superadmin/dashboard",
            Self::SaDashboardHome => "/superadmin/dashboard/home",
            Self::SaManageAdmins => "/superadmin/dashboard/admins",
            Self::SaManagePlans => "/superadmin/dashboard/plans",
            Self::AdminLogin => "/admin/login",
            Self::AdminDashboard => "/admin/dashboard",
            Self::AdminDashboardHome => "/admin/dashboard/home",
            Self::AdminViewPlans => "/admin/dashboard/plans",
            Self::AdminManageUsers => "/admin/dashboard/users",
            Self::AdminRecharge => "/admin/dashboard/recharge",
            Self::PaymentSuccess => "/payment/success",
            Self::PaymentFailed => "/payment/failed",
            Self::NotFound => "/404",
        }
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// METADATA
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub requires_guest: bool,
    pub user_type: Option<Role>,
}

impl RouteMeta {
    pub const PUBLIC: Self = Self { requires_auth: false, requires_guest: false, user_type: None };

    #[must_use]
    pub const fn protected(role: Role) -> Self {
        Self { requires_auth: true, requires_guest: false, user_type: Some(role) }
    }

    #[must_use]
    pub const fn guest(role: Role) -> Self {
        Self { requires_auth: false, requires_guest: true, user_type: Some(role) }
    }

    fn inherit(self, child: Self) -> Self {
        Self {
            requires_auth: self.requires_auth || child.requires_auth,
            requires_guest: self.requires_guest || child.requires_guest,
            user_type: child.user_type.or(self.user_type),
        }
    }
}

// =============================================================================
// TABLE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordRedirect {
    /// `/`: the active role's dashboard, or the default login.
    ByRole,
    To(RouteName),
}

struct RouteRecord {
    segment: &'static str,
    name: RouteName,
    meta: RouteMeta,
    redirect: Option<RecordRedirect>,
    children: &'static [RouteRecord],
}

impl RouteRecord {
    const fn view(segment: &'static str, name: RouteName, meta: RouteMeta) -> Self {
        Self { segment, name, meta, redirect: None, children: &[] }
    }

    const fn layout(
        segment: &'static str,
        name: RouteName,
        meta: RouteMeta,
        home: RouteName,
        children: &'static [RouteRecord],
    ) -> Self {
        Self { segment, name, meta, redirect: Some(RecordRedirect::To(home)), children }
    }
}

static ROUTES: &[RouteRecord] = &[
    RouteRecord {
        segment: "",
        name: RouteName::Root,
        meta: RouteMeta::PUBLIC,
        redirect: Some(RecordRedirect::ByRole),
        children: &[],
    },
    RouteRecord::view("superadmin/login", RouteName::SuperAdminLogin, RouteMeta::guest(Role::SuperAdmin)),
    RouteRecord::layout(
        "superadmin/dashboard",
        RouteName::SuperAdminDashboard,
        RouteMeta::protected(Role::SuperAdmin),
        RouteName::SaDashboardHome,
        &[
            RouteRecord::view("home", RouteName::SaDashboardHome, RouteMeta::PUBLIC),
            RouteRecord::view("admins", RouteName::SaManageAdmins, RouteMeta::PUBLIC),
            RouteRecord::view("plans", RouteName::SaManagePlans, RouteMeta::PUBLIC),
        ],
    ),
    RouteRecord::view("admin/login", RouteName::AdminLogin, RouteMeta::guest(Role::Admin)),
    RouteRecord::layout(
        "admin/dashboard",
        RouteName::AdminDashboard,
        RouteMeta::protected(Role::Admin),
        RouteName::AdminDashboardHome,
        &[
            RouteRecord::view("home", RouteName::AdminDashboardHome, RouteMeta::PUBLIC),
            RouteRecord::view("plans", RouteName::AdminViewPlans, RouteMeta::PUBLIC),
            RouteRecord::view("users", RouteName::AdminManageUsers, RouteMeta::PUBLIC),
            RouteRecord::view("recharge", RouteName::AdminRecharge, RouteMeta::PUBLIC),
        ],
    ),
    RouteRecord::view("payment/success", RouteName::PaymentSuccess, RouteMeta::PUBLIC),
    RouteRecord::view("payment/failed", RouteName::PaymentFailed, RouteMeta::PUBLIC),
];

// =============================================================================
// RESOLUTION
// =============================================================================

/// A path resolved against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub name: RouteName,
    /// Effective metadata after inheritance from parent records.
    pub meta: RouteMeta,
    pub redirect: Option<RecordRedirect>,
    pub query: Vec<(String, String)>,
}

impl RouteMatch {
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Resolve a path (optionally with `?query`) to a route. Total: anything
/// that matches no record is `NotFound`.
#[must_use]
pub fn resolve(path: &str) -> RouteMatch {
    let (segments, query) = split_path(path);
    let (name, meta, redirect) = match_segments(&segments).unwrap_or((RouteName::NotFound, RouteMeta::PUBLIC, None));
    RouteMatch { name, meta, redirect, query }
}

/// Resolve a route by name, without query parameters.
#[must_use]
pub fn resolve_name(name: RouteName) -> RouteMatch {
    resolve(name.path())
}

fn split_path(raw: &str) -> (Vec<String>, Vec<(String, String)>) {
    let trimmed = raw.trim();
    let relative = if trimmed.starts_with('/') { trimmed.to_owned() } else { format!("/{trimmed}") };

    match Url::parse(&format!("http://panel.local{relative}")) {
        Ok(url) => {
            let segments = url
                .path()
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect();
            let query = url
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            (segments, query)
        }
        Err(e) => {
            tracing::debug!(path = %raw, error = %e, "unparseable route path");
            // An empty segment matches no record.
            (vec![String::new()], Vec::new())
        }
    }
}

fn match_segments(segments: &[String]) -> Option<(RouteName, RouteMeta, Option<RecordRedirect>)> {
    for record in ROUTES {
        let record_segments: Vec<&str> = record.segment.split('/').filter(|s| !s.is_empty()).collect();
        if segments.len() < record_segments.len()
            || segments
                .iter()
                .zip(&record_segments)
                .any(|(a, b)| a != b)
        {
            continue;
        }

        let rest = &segments[record_segments.len()..];
        match rest {
            [] => return Some((record.name, record.meta, record.redirect)),
            [child_segment] => {
                if let Some(child) = record.children.iter().find(|c| c.segment == child_segment.as_str()) {
                    return Some((child.name, record.meta.inherit(child.meta), child.redirect));
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
