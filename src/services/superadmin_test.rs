use super::*;
use crate::net::Body;
use crate::net::transport::test_helpers::{BASE_URL, harness};
use reqwest::Method;
use serde_json::json;

fn query(skip: &str, limit: &str) -> Vec<(String, String)> {
    vec![("skip".into(), skip.into()), ("limit".into(), limit.into())]
}

#[tokio::test]
async fn list_admins_passes_default_page() {
    let h = harness();
    h.transport.push_json(200, json!([{"id": 1, "username": "ali"}]));

    let admins = SuperadminService::new(h.client.clone())
        .list_admins(Page::default())
        .await
        .unwrap();

    assert_eq!(admins, json!([{"id": 1, "username": "ali"}]));
    let requests = h.transport.requests();
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[0].url, format!("{BASE_URL}/admins/"));
    assert_eq!(requests[0].query, query("0", "100"));
}

#[tokio::test]
async fn list_plans_passes_custom_page() {
    let h = harness();
    h.transport.push_json(200, json!([]));

    SuperadminService::new(h.client.clone())
        .list_plans(Page::new(20, 5))
        .await
        .unwrap();

    let requests = h.transport.requests();
    assert_eq!(requests[0].url, format!("{BASE_URL}/plans/"));
    assert_eq!(requests[0].query, query("20", "5"));
}

#[tokio::test]
async fn create_admin_omits_missing_email() {
    let h = harness();
    h.transport.push_json(201, json!({"id": 2}));

    let admin = NewAdmin { username: "reza".into(), email: None, password: "pw".into() };
    SuperadminService::new(h.client.clone())
        .create_admin(&admin)
        .await
        .unwrap();

    let requests = h.transport.requests();
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].body, Body::Json(json!({"username": "reza", "password": "pw"})));
}

#[tokio::test]
async fn update_admin_sends_only_set_fields() {
    let h = harness();
    h.transport.push_json(200, json!({"id": 2, "is_active": false}));

    let update = AdminUpdate { is_active: Some(false), ..AdminUpdate::default() };
    SuperadminService::new(h.client.clone())
        .update_admin(2, &update)
        .await
        .unwrap();

    let requests = h.transport.requests();
    assert_eq!(requests[0].method, Method::PUT);
    assert_eq!(requests[0].url, format!("{BASE_URL}/admins/2"));
    assert_eq!(requests[0].body, Body::Json(json!({"is_active": false})));
}

#[tokio::test]
async fn create_plan_sends_price_as_decimal_string() {
    let h = harness();
    h.transport.push_json(201, json!({"id": 9}));

    let plan = NewPlan { name: "Gold".into(), duration_days: 30, data_limit_gb: 50, price: "150000.00".into() };
    SuperadminService::new(h.client.clone())
        .create_plan(&plan)
        .await
        .unwrap();

    let requests = h.transport.requests();
    assert_eq!(
        requests[0].body,
        Body::Json(json!({"name": "Gold", "duration_days": 30, "data_limit_gb": 50, "price": "150000.00"}))
    );
}

#[tokio::test]
async fn single_resource_paths() {
    let h = harness();
    for _ in 0..4 {
        h.transport.push_json(200, json!({}));
    }
    let service = SuperadminService::new(h.client.clone());

    service.get_admin(3).await.unwrap();
    service.delete_admin(3).await.unwrap();
    service.get_plan(4).await.unwrap();
    service
        .update_plan(4, &PlanUpdate { name: Some("Silver".into()), ..PlanUpdate::default() })
        .await
        .unwrap();

    let calls: Vec<(Method, String)> = h
        .transport
        .requests()
        .into_iter()
        .map(|r| (r.method, r.url))
        .collect();
    assert_eq!(
        calls,
        vec![
            (Method::GET, format!("{BASE_URL}/admins/3")),
            (Method::DELETE, format!("{BASE_URL}/admins/3")),
            (Method::GET, format!("{BASE_URL}/plans/4")),
            (Method::PUT, format!("{BASE_URL}/plans/4")),
        ]
    );
}

#[tokio::test]
async fn delete_plan_rejection_propagates_unmodified() {
    let h = harness();
    h.transport.push_json(404, json!({"detail": "Plan not found"}));

    let err = SuperadminService::new(h.client.clone())
        .delete_plan(99)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.remote_body(), Some(&json!({"detail": "Plan not found"})));
}
