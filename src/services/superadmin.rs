//! Superadmin API surface: admin accounts and subscription plans.

use serde_json::Value;

use super::Page;
use super::types::{AdminUpdate, NewAdmin, NewPlan, PlanUpdate};
use crate::net::{ApiClient, ApiError};

#[derive(Clone)]
pub struct SuperadminService {
    client: ApiClient,
}

impl SuperadminService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    // =========================================================================
    // ADMINS
    // =========================================================================

    /// `GET /admins/?skip=&limit=`
    ///
    /// # Errors
    ///
    /// Propagates the remote rejection or transport failure unchanged.
    pub async fn list_admins(&self, page: Page) -> Result<Value, ApiError> {
        self.client.get("/admins/", &page.query()).await
    }

    /// `GET /admins/{id}`
    ///
    /// # Errors
    ///
    /// Propagates the remote rejection or transport failure unchanged.
    pub async fn get_admin(&self, admin_id: i64) -> Result<Value, ApiError> {
        self.client.get(&format!("/admins/{admin_id}"), &[]).await
    }

    /// `POST /admins/`
    ///
    /// # Errors
    ///
    /// Propagates the remote rejection or transport failure unchanged.
    pub async fn create_admin(&self, admin: &NewAdmin) -> Result<Value, ApiError> {
        self.client.post_json("/admins/", admin).await
    }

    /// `PUT /admins/{id}`
    ///
    /// # Errors
    ///
    /// Propagates the remote rejection or transport failure unchanged.
    pub async fn update_admin(&self, admin_id: i64, update: &AdminUpdate) -> Result<Value, ApiError> {
        self.client
            .put_json(&format!("/admins/{admin_id}"), update)
            .await
    }

    /// `DELETE /admins/{id}`
    ///
    /// # Errors
    ///
    /// Propagates the remote rejection or transport failure unchanged.
    pub async fn delete_admin(&self, admin_id: i64) -> Result<Value, ApiError> {
        self.client.delete(&format!("/admins/{admin_id}")).await
    }

    // =========================================================================
    // PLANS
    // =========================================================================

    /// `GET /plans/?skip=&limit=`
    ///
    /// # Errors
    ///
    /// Propagates the remote rejection or transport failure unchanged.
    pub async fn list_plans(&self, page: Page) -> Result<Value, ApiError> {
        self.client.get("/plans/", &page.query()).await
    }

    /// `GET /plans/{id}`
    ///
    /// # Errors
    ///
    /// Propagates the remote rejection or transport failure unchanged.
    pub async fn get_plan(&self, plan_id: i64) -> Result<Value, ApiError> {
        self.client.get(&format!("/plans/{plan_id}"), &[]).await
    }

    /// `POST /plans/`
    ///
    /// # Errors
    ///
    /// Propagates the remote rejection or transport failure unchanged.
    pub async fn create_plan(&self, plan: &NewPlan) -> Result<Value, ApiError> {
        self.client.post_json("/plans/", plan).await
    }

    /// `PUT /plans/{id}`
    ///
    /// # Errors
    ///
    /// Propagates the remote rejection or transport failure unchanged.
    pub async fn update_plan(&self, plan_id: i64, update: &PlanUpdate) -> Result<Value, ApiError> {
        self.client
            .put_json(&format!("/plans/{plan_id}"), update)
            .await
    }

    /// `DELETE /plans/{id}`
    ///
    /// # Errors
    ///
    /// Propagates the remote rejection or transport failure unchanged.
    pub async fn delete_plan(&self, plan_id: i64) -> Result<Value, ApiError> {
        self.client.delete(&format!("/plans/{plan_id}")).await
    }
}

#[cfg(test)]
#[path = "superadmin_test.rs"]
mod tests;
