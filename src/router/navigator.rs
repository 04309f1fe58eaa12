//! Follows record and guard redirects until a route is allowed.

use super::guard::{Decision, dashboard_for, guard, login_for};
use super::routes::{RecordRedirect, RouteMatch, RouteName, resolve, resolve_name};
use crate::state::Session;

pub const MAX_HOPS: usize = 8;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("redirect loop navigating to {path}: {}", format_trail(.trail))]
    RedirectLoop { path: String, trail: Vec<RouteName> },
}

fn format_trail(trail: &[RouteName]) -> String {
    trail.iter().map(|r| r.as_str()).collect::<Vec<_>>().join(" -> ")
}

/// Outcome of a navigation: the route finally entered and every route
/// passed through on the way (the requested one first, the final one
/// excluded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub route: RouteMatch,
    pub trail: Vec<RouteName>,
}

impl Navigation {
    #[must_use]
    pub fn redirected(&self) -> bool {
        !self.trail.is_empty()
    }
}

/// Resolve `path` for `session` and follow redirects.
///
/// # Errors
///
/// `RedirectLoop` when no allowed route is reached within `MAX_HOPS`.
pub fn navigate(path: &str, session: &Session) -> Result<Navigation, NavigationError> {
    let mut current = resolve(path);
    let mut trail = Vec::new();

    for _ in 0..=MAX_HOPS {
        let next = match current.redirect {
            Some(RecordRedirect::ByRole) => Some(session.role().map_or_else(|| login_for(None), dashboard_for)),
            Some(RecordRedirect::To(target)) => Some(target),
            None => match guard(&current.meta, session) {
                Decision::Allow => None,
                Decision::Redirect(target) => Some(target),
            },
        };

        let Some(target) = next else {
            tracing::debug!(path, route = %current.name, hops = trail.len(), "navigation settled");
            return Ok(Navigation { route: current, trail });
        };

        tracing::debug!(from = %current.name, to = %target, "redirect");
        trail.push(current.name);
        current = resolve_name(target);
    }

    tracing::warn!(path, trail = %format_trail(&trail), "redirect loop");
    Err(NavigationError::RedirectLoop { path: path.to_owned(), trail })
}

#[cfg(test)]
#[path = "navigator_test.rs"]
mod tests;
