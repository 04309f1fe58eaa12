//! Admin API surface: VPN users, active plans, balance recharge.

use serde_json::Value;

use super::Page;
use super::types::{NewVpnUser, PaymentRequest};
use crate::net::{ApiClient, ApiError};

#[derive(Clone)]
pub struct AdminService {
    client: ApiClient,
}

impl AdminService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    // =========================================================================
    // VPN USERS
    // =========================================================================

    /// `GET /admin/vpnusers/?skip=&limit=`
    ///
    /// # Errors
    ///
    /// Propagates the remote rejection or transport failure unchanged.
    pub async fn list_vpn_users(&self, page: Page) -> Result<Value, ApiError> {
        self.client.get("/admin/vpnusers/", &page.query()).await
    }

    /// `POST /admin/vpnusers/`
    ///
    /// # Errors
    ///
    /// Propagates the remote rejection or transport failure unchanged.
    pub async fn create_vpn_user(&self, user: &NewVpnUser) -> Result<Value, ApiError> {
        self.client.post_json("/admin/vpnusers/", user).await
    }

    /// `GET /admin/vpnusers/{username}`, including panel-side details.
    ///
    /// # Errors
    ///
    /// Propagates the remote rejection or transport failure unchanged.
    pub async fn get_vpn_user(&self, username: &str) -> Result<Value, ApiError> {
        self.client
            .get(&format!("/admin/vpnusers/{username}"), &[])
            .await
    }

    /// `DELETE /admin/vpnusers/{username}`
    ///
    /// # Errors
    ///
    /// Propagates the remote rejection or transport failure unchanged.
    pub async fn delete_vpn_user(&self, username: &str) -> Result<Value, ApiError> {
        self.client
            .delete(&format!("/admin/vpnusers/{username}"))
            .await
    }

    /// `POST /admin/vpnusers/{username}/reset-traffic`
    ///
    /// # Errors
    ///
    /// Propagates the remote rejection or transport failure unchanged.
    pub async fn reset_vpn_user_traffic(&self, username: &str) -> Result<Value, ApiError> {
        self.client
            .post(&format!("/admin/vpnusers/{username}/reset-traffic"))
            .await
    }

    /// `GET /admin/vpnusers/{username}/subscription-info`
    ///
    /// # Errors
    ///
    /// Propagates the remote rejection or transport failure unchanged.
    pub async fn vpn_user_subscription(&self, username: &str) -> Result<Value, ApiError> {
        self.client
            .get(&format!("/admin/vpnusers/{username}/subscription-info"), &[])
            .await
    }

    // =========================================================================
    // PLANS
    // =========================================================================

    /// `GET /admin/plans`: plans currently on sale.
    ///
    /// # Errors
    ///
    /// Propagates the remote rejection or transport failure unchanged.
    pub async fn active_plans(&self) -> Result<Value, ApiError> {
        self.client.get("/admin/plans", &[]).await
    }

    // =========================================================================
    // PAYMENTS
    // =========================================================================

    /// `POST /admin/payments/request`. The response carries the gateway
    /// `payment_url` to open.
    ///
    /// # Errors
    ///
    /// Propagates the remote rejection or transport failure unchanged.
    pub async fn request_payment(&self, amount: u64) -> Result<Value, ApiError> {
        self.client
            .post_json("/admin/payments/request", &PaymentRequest { amount })
            .await
    }

    /// `GET /admin/payments/logs?skip=&limit=`
    ///
    /// # Errors
    ///
    /// Propagates the remote rejection or transport failure unchanged.
    pub async fn payment_logs(&self, page: Page) -> Result<Value, ApiError> {
        self.client
            .get("/admin/payments/logs", &page.query())
            .await
    }
}

#[cfg(test)]
#[path = "admin_test.rs"]
mod tests;
