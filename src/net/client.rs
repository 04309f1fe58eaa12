//! HTTP client adapter for the panel REST API.
//!
//! DESIGN
//! ======
//! Every call reads the current token from the shared `SessionStore` right
//! before dispatch and attaches it as `Authorization: Bearer <token>`. A
//! missing token is not an error here: the backend rejects the call and the
//! rejection propagates to the caller unchanged.
//!
//! ERROR HANDLING
//! ==============
//! - transport failure            -> `ApiError::Transport`
//! - non-2xx with any body        -> `ApiError::Rejected { status, body }`
//! - 2xx with an undecodable body -> `ApiError::Decode`
//!
//! Rejection bodies are kept as JSON when they parse (FastAPI sends
//! `{"detail": ...}`), otherwise as a JSON string of the raw text.

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::transport::{Body, HttpRequest, HttpResponse, Transport};
use crate::state::SessionStore;

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("request rejected with status {status}: {body}")]
    Rejected { status: u16, body: Value },

    #[error("response decode failed: {0}")]
    Decode(String),

    #[error("request body encode failed: {0}")]
    Encode(String),

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ApiError {
    /// The structured remote body for rejections.
    #[must_use]
    pub fn remote_body(&self) -> Option<&Value> {
        match self {
            Self::Rejected { body, .. } => Some(body),
            _ => None,
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, base_url: impl Into<String>, session: SessionStore) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { transport, base_url, session }
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// # Errors
    ///
    /// See the module docs for the error taxonomy.
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        self.dispatch(Method::GET, path, query, Body::Empty, None).await
    }

    /// GET with an explicit bearer token instead of the session's.
    ///
    /// # Errors
    ///
    /// See the module docs for the error taxonomy.
    pub async fn get_with_token(&self, path: &str, token: &str) -> Result<Value, ApiError> {
        self.dispatch(Method::GET, path, &[], Body::Empty, Some(token)).await
    }

    /// # Errors
    ///
    /// See the module docs for the error taxonomy.
    pub async fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Value, ApiError> {
        let body = encode(body)?;
        self.dispatch(Method::POST, path, &[], Body::Json(body), None).await
    }

    /// POST with no body.
    ///
    /// # Errors
    ///
    /// See the module docs for the error taxonomy.
    pub async fn post(&self, path: &str) -> Result<Value, ApiError> {
        self.dispatch(Method::POST, path, &[], Body::Empty, None).await
    }

    /// POST as `application/x-www-form-urlencoded`.
    ///
    /// # Errors
    ///
    /// See the module docs for the error taxonomy.
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> Result<Value, ApiError> {
        let fields = fields
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        self.dispatch(Method::POST, path, &[], Body::Form(fields), None).await
    }

    /// # Errors
    ///
    /// See the module docs for the error taxonomy.
    pub async fn put_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Value, ApiError> {
        let body = encode(body)?;
        self.dispatch(Method::PUT, path, &[], Body::Json(body), None).await
    }

    /// # Errors
    ///
    /// See the module docs for the error taxonomy.
    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.dispatch(Method::DELETE, path, &[], Body::Empty, None).await
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Body,
        token_override: Option<&str>,
    ) -> Result<Value, ApiError> {
        let token = match token_override {
            Some(token) => Some(token.to_owned()),
            None => self.session.token().await,
        };
        let request = HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            query: query
                .iter()
                .map(|(k, v)| ((*k).to_owned(), v.clone()))
                .collect(),
            authorization: token.map(|t| format!("Bearer {t}")),
            body,
        };

        tracing::debug!(method = %request.method, url = %request.url, authed = request.authorization.is_some(), "api request");
        let response = self.transport.send(request).await?;
        decode_response(response)
    }
}

fn encode<T: Serialize + ?Sized>(body: &T) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))
}

fn decode_response(response: HttpResponse) -> Result<Value, ApiError> {
    let HttpResponse { status, body } = response;

    if (200..300).contains(&status) {
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        return serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()));
    }

    let body = serde_json::from_str(&body).unwrap_or(Value::String(body));
    tracing::debug!(status, "api request rejected");
    Err(ApiError::Rejected { status, body })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
