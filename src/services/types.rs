//! Request bodies sent to the panel API.
//!
//! Response entities stay opaque `serde_json::Value`; only what this client
//! writes is typed. Field names match the backend schemas. Money amounts
//! are decimal strings so no precision is lost on the way through.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAdmin {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub password: String,
}

/// Partial update; unset fields are omitted from the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdminUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPlan {
    pub name: String,
    pub duration_days: u32,
    /// `0` means unlimited.
    pub data_limit_gb: u32,
    pub price: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlanUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_limit_gb: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewVpnUser {
    pub username: String,
    pub plan_id: i64,
}

/// Balance recharge request, in Toman.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentRequest {
    pub amount: u64,
}
