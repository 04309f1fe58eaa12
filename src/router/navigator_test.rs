use super::*;
use crate::state::Role;

fn authed(role: Role) -> Session {
    Session::Authenticated { token: "T".into(), role, profile: None }
}

fn settle(path: &str, session: &Session) -> (RouteName, Vec<RouteName>) {
    let nav = navigate(path, session).unwrap();
    (nav.route.name, nav.trail)
}

#[test]
fn anonymous_admin_page_lands_on_admin_login() {
    let (route, trail) = settle("/admin/dashboard/users", &Session::Anonymous);
    assert_eq!(route, RouteName::AdminLogin);
    assert_eq!(trail, vec![RouteName::AdminManageUsers]);
}

#[test]
fn admin_on_superadmin_page_lands_on_admin_home() {
    let (route, trail) = settle("/superadmin/dashboard/admins", &authed(Role::Admin));
    assert_eq!(route, RouteName::AdminDashboardHome);
    assert_eq!(trail, vec![RouteName::SaManageAdmins, RouteName::AdminDashboard]);
}

#[test]
fn authenticated_login_page_lands_on_dashboard_home() {
    let (route, trail) = settle("/superadmin/login", &authed(Role::SuperAdmin));
    assert_eq!(route, RouteName::SaDashboardHome);
    assert_eq!(trail, vec![RouteName::SuperAdminLogin, RouteName::SuperAdminDashboard]);
}

#[test]
fn root_follows_role() {
    assert_eq!(settle("/", &Session::Anonymous).0, RouteName::SuperAdminLogin);
    assert_eq!(settle("/", &authed(Role::SuperAdmin)).0, RouteName::SaDashboardHome);
    assert_eq!(settle("/", &authed(Role::Admin)).0, RouteName::AdminDashboardHome);
}

#[test]
fn anonymous_dashboard_root_goes_through_home_to_login() {
    let (route, trail) = settle("/admin/dashboard", &Session::Anonymous);
    assert_eq!(route, RouteName::AdminLogin);
    assert_eq!(trail, vec![RouteName::AdminDashboard, RouteName::AdminDashboardHome]);
}

#[test]
fn allowed_route_has_empty_trail_and_keeps_query() {
    let nav = navigate("/payment/success?ref_id=42", &Session::Anonymous).unwrap();
    assert!(!nav.redirected());
    assert_eq!(nav.route.name, RouteName::PaymentSuccess);
    assert_eq!(nav.route.query_value("ref_id"), Some("42"));
}

#[test]
fn unknown_path_settles_on_not_found() {
    for session in [Session::Anonymous, authed(Role::Admin)] {
        let (route, trail) = settle("/does/not/exist", &session);
        assert_eq!(route, RouteName::NotFound);
        assert!(trail.is_empty());
    }
}

#[test]
fn every_path_settles_within_hop_limit() {
    let sessions = [Session::Anonymous, authed(Role::Admin), authed(Role::SuperAdmin)];
    for name in [
        RouteName::Root,
        RouteName::SuperAdminLogin,
        RouteName::SuperAdminDashboard,
        RouteName::SaManagePlans,
        RouteName::AdminLogin,
        RouteName::AdminDashboard,
        RouteName::AdminRecharge,
        RouteName::PaymentFailed,
    ] {
        for session in &sessions {
            let nav = navigate(name.path(), session).unwrap();
            assert!(nav.trail.len() <= MAX_HOPS);
            assert!(nav.route.redirect.is_none());
        }
    }
}

#[test]
fn redirect_loop_message_lists_trail() {
    let err = NavigationError::RedirectLoop {
        path: "/x".into(),
        trail: vec![RouteName::AdminLogin, RouteName::AdminDashboard],
    };
    assert_eq!(err.to_string(), "redirect loop navigating to /x: AdminLogin -> AdminDashboard");
}
