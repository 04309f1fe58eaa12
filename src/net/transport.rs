//! Wire-level request/response types and the transport seam.
//!
//! `ApiClient` builds an `HttpRequest` and hands it to a `Transport`.
//! `ReqwestTransport` is the production implementation; tests script
//! responses through `test_helpers::MockTransport`.

use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;

use super::client::ApiError;
use crate::config::Timeouts;

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Json(Value),
    /// Sent as `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    /// Full `Authorization` header value, e.g. `Bearer abc`.
    pub authorization: Option<String>,
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

// =============================================================================
// TRAIT
// =============================================================================

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Dispatch one request. Non-2xx statuses are returned as responses,
    /// not errors; only transport-level failures are `Err`.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

// =============================================================================
// REQWEST
// =============================================================================

pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(timeouts: Timeouts) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeouts.request())
            .connect_timeout(timeouts.connect())
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http })
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self.http.request(request.method, &request.url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(value) = &request.authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder = match &request.body {
            Body::Empty => builder,
            Body::Json(json) => builder.json(json),
            Body::Form(fields) => builder.form(fields),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex, PoisonError};

    use crate::net::client::ApiClient;
    use crate::state::SessionStore;
    use crate::storage::MemoryStorage;

    pub const BASE_URL: &str = "http://panel.test/api/v1";

    /// Scripted transport: pops responses in order and records every request.
    #[derive(Default)]
    pub struct MockTransport {
        responses: Mutex<VecDeque<Result<HttpResponse, ApiError>>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl MockTransport {
        pub fn push_json(&self, status: u16, body: Value) {
            self.push_raw(status, &body.to_string());
        }

        pub fn push_raw(&self, status: u16, body: &str) {
            self.responses
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push_back(Ok(HttpResponse { status, body: body.to_owned() }));
        }

        pub fn push_error(&self, error: ApiError) {
            self.responses
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push_back(Err(error));
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            self.requests
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }
    }

    #[async_trait::async_trait]
    impl Transport for MockTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.requests
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(request);
            self.responses
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Transport("no scripted response".into())))
        }
    }

    pub struct Harness {
        pub client: ApiClient,
        pub transport: Arc<MockTransport>,
        pub storage: Arc<MemoryStorage>,
    }

    /// An anonymous client wired to a fresh mock transport and memory storage.
    pub fn harness() -> Harness {
        let transport = Arc::new(MockTransport::default());
        let storage = Arc::new(MemoryStorage::new());
        let session = SessionStore::new(storage.clone());
        let client = ApiClient::new(transport.clone(), BASE_URL, session);
        Harness { client, transport, storage }
    }
}
