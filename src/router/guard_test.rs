use super::*;

fn authed(role: Role) -> Session {
    Session::Authenticated { token: "T".into(), role, profile: None }
}

#[test]
fn anonymous_on_protected_admin_route_goes_to_admin_login() {
    let decision = guard(&RouteMeta::protected(Role::Admin), &Session::Anonymous);
    assert_eq!(decision, Decision::Redirect(RouteName::AdminLogin));
}

#[test]
fn anonymous_on_protected_superadmin_route_goes_to_superadmin_login() {
    let decision = guard(&RouteMeta::protected(Role::SuperAdmin), &Session::Anonymous);
    assert_eq!(decision, Decision::Redirect(RouteName::SuperAdminLogin));
}

#[test]
fn anonymous_on_untyped_protected_route_goes_to_default_login() {
    let meta = RouteMeta { requires_auth: true, ..RouteMeta::PUBLIC };
    assert_eq!(guard(&meta, &Session::Anonymous), Decision::Redirect(RouteName::SuperAdminLogin));
}

#[test]
fn wrong_role_goes_to_own_dashboard() {
    assert_eq!(
        guard(&RouteMeta::protected(Role::SuperAdmin), &authed(Role::Admin)),
        Decision::Redirect(RouteName::AdminDashboard)
    );
    assert_eq!(
        guard(&RouteMeta::protected(Role::Admin), &authed(Role::SuperAdmin)),
        Decision::Redirect(RouteName::SuperAdminDashboard)
    );
}

#[test]
fn matching_role_is_allowed() {
    for role in Role::ALL {
        assert_eq!(guard(&RouteMeta::protected(role), &authed(role)), Decision::Allow);
    }
}

#[test]
fn authenticated_on_guest_route_goes_to_own_dashboard() {
    assert_eq!(
        guard(&RouteMeta::guest(Role::SuperAdmin), &authed(Role::SuperAdmin)),
        Decision::Redirect(RouteName::SuperAdminDashboard)
    );
    assert_eq!(
        guard(&RouteMeta::guest(Role::SuperAdmin), &authed(Role::Admin)),
        Decision::Redirect(RouteName::AdminDashboard)
    );
}

#[test]
fn anonymous_on_guest_route_is_allowed() {
    for role in Role::ALL {
        assert_eq!(guard(&RouteMeta::guest(role), &Session::Anonymous), Decision::Allow);
    }
}

#[test]
fn public_routes_allow_everyone() {
    for session in [Session::Anonymous, authed(Role::Admin), authed(Role::SuperAdmin)] {
        assert_eq!(guard(&RouteMeta::PUBLIC, &session), Decision::Allow);
    }
}

#[test]
fn redirect_tables() {
    assert_eq!(login_for(Some(Role::Admin)), RouteName::AdminLogin);
    assert_eq!(login_for(Some(Role::SuperAdmin)), RouteName::SuperAdminLogin);
    assert_eq!(login_for(None), RouteName::SuperAdminLogin);
    assert_eq!(dashboard_for(Role::SuperAdmin), RouteName::SuperAdminDashboard);
    assert_eq!(dashboard_for(Role::Admin), RouteName::AdminDashboard);
}
