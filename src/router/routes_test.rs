use super::*;

#[test]
fn root_redirects_by_role() {
    let root = resolve("/");
    assert_eq!(root.name, RouteName::Root);
    assert_eq!(root.redirect, Some(RecordRedirect::ByRole));
    assert_eq!(root.meta, RouteMeta::PUBLIC);
}

#[test]
fn login_pages_are_guest_only() {
    assert_eq!(resolve("/superadmin/login").meta, RouteMeta::guest(Role::SuperAdmin));
    assert_eq!(resolve("/admin/login").meta, RouteMeta::guest(Role::Admin));
}

#[test]
fn dashboard_layout_redirects_to_home() {
    let m = resolve("/admin/dashboard");
    assert_eq!(m.name, RouteName::AdminDashboard);
    assert_eq!(m.redirect, Some(RecordRedirect::To(RouteName::AdminDashboardHome)));
    assert_eq!(m.meta, RouteMeta::protected(Role::Admin));
}

#[test]
fn children_inherit_parent_meta() {
    for (path, name) in [
        ("/superadmin/dashboard/home", RouteName::SaDashboardHome),
        ("/superadmin/dashboard/admins", RouteName::SaManageAdmins),
        ("/superadmin/dashboard/plans", RouteName::SaManagePlans),
    ] {
        let m = resolve(path);
        assert_eq!(m.name, name, "{path}");
        assert_eq!(m.meta, RouteMeta::protected(Role::SuperAdmin), "{path}");
        assert_eq!(m.redirect, None, "{path}");
    }

    let recharge = resolve("/admin/dashboard/recharge");
    assert_eq!(recharge.name, RouteName::AdminRecharge);
    assert!(recharge.meta.requires_auth);
    assert_eq!(recharge.meta.user_type, Some(Role::Admin));
}

#[test]
fn same_child_segment_resolves_per_parent() {
    assert_eq!(resolve("/superadmin/dashboard/plans").name, RouteName::SaManagePlans);
    assert_eq!(resolve("/admin/dashboard/plans").name, RouteName::AdminViewPlans);
}

#[test]
fn trailing_slash_is_ignored() {
    assert_eq!(resolve("/admin/dashboard/users/").name, RouteName::AdminManageUsers);
    assert_eq!(resolve("/superadmin/login/").name, RouteName::SuperAdminLogin);
}

#[test]
fn missing_leading_slash_is_tolerated() {
    assert_eq!(resolve("admin/login").name, RouteName::AdminLogin);
}

#[test]
fn payment_callbacks_keep_query() {
    let success = resolve("/payment/success?ref_id=123456");
    assert_eq!(success.name, RouteName::PaymentSuccess);
    assert_eq!(success.meta, RouteMeta::PUBLIC);
    assert_eq!(success.query_value("ref_id"), Some("123456"));

    let failed = resolve("/payment/failed?error=Canceled%20by%20user&code=-51");
    assert_eq!(failed.name, RouteName::PaymentFailed);
    assert_eq!(failed.query_value("error"), Some("Canceled by user"));
    assert_eq!(failed.query_value("code"), Some("-51"));
    assert_eq!(failed.query_value("ref_id"), None);
}

#[test]
fn unknown_paths_are_not_found() {
    for path in ["/nope", "/404", "/admin", "/admin/dashboard/home/extra", "/superadmin/dashboard/users"] {
        let m = resolve(path);
        assert_eq!(m.name, RouteName::NotFound, "{path}");
        assert_eq!(m.meta, RouteMeta::PUBLIC, "{path}");
    }
}

#[test]
fn every_named_route_resolves_to_itself() {
    for name in [
        RouteName::Root,
        RouteName::SuperAdminLogin,
        RouteName::SuperAdminDashboard,
        RouteName::SaDashboardHome,
        RouteName::SaManageAdmins,
        RouteName::SaManagePlans,
        RouteName::AdminLogin,
        RouteName::AdminDashboard,
        RouteName::AdminDashboardHome,
        RouteName::AdminViewPlans,
        RouteName::AdminManageUsers,
        RouteName::AdminRecharge,
        RouteName::PaymentSuccess,
        RouteName::PaymentFailed,
        RouteName::NotFound,
    ] {
        assert_eq!(resolve_name(name).name, name);
    }
}

#[test]
fn display_uses_route_names() {
    assert_eq!(RouteName::SaDashboardHome.to_string(), "SADashboardHome");
    assert_eq!(RouteName::SaManageAdmins.to_string(), "SAManageAdmins");
}
