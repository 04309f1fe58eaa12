//! Navigation guard: decides whether a session may enter a route.

use super::routes::{RouteMeta, RouteName};
use crate::state::{Role, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(RouteName),
}

/// Login page for a route's expected role; superadmin login is the default.
#[must_use]
pub fn login_for(role: Option<Role>) -> RouteName {
    match role {
        Some(Role::Admin) => RouteName::AdminLogin,
        Some(Role::SuperAdmin) | None => RouteName::SuperAdminLogin,
    }
}

#[must_use]
pub fn dashboard_for(role: Role) -> RouteName {
    match role {
        Role::SuperAdmin => RouteName::SuperAdminDashboard,
        Role::Admin => RouteName::AdminDashboard,
    }
}

/// Total over every (meta, session) pair.
#[must_use]
pub fn guard(meta: &RouteMeta, session: &Session) -> Decision {
    if meta.requires_auth {
        return match session.role() {
            None => Decision::Redirect(login_for(meta.user_type)),
            Some(role) if meta.user_type.is_some_and(|expected| expected != role) => {
                Decision::Redirect(dashboard_for(role))
            }
            Some(_) => Decision::Allow,
        };
    }

    if meta.requires_guest {
        if let Some(role) = session.role() {
            return Decision::Redirect(dashboard_for(role));
        }
    }

    Decision::Allow
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
