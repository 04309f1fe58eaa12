//! Panel routing: the route table, the navigation guard and the navigator
//! that ties them to a session.

pub mod guard;
pub mod navigator;
pub mod routes;

pub use guard::{Decision, dashboard_for, guard, login_for};
pub use navigator::{MAX_HOPS, Navigation, NavigationError, navigate};
pub use routes::{RecordRedirect, RouteMatch, RouteMeta, RouteName, resolve, resolve_name};
