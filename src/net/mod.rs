//! Network layer: the bearer-attaching API client and its transport seam.

pub mod client;
pub mod transport;

pub use client::{ApiClient, ApiError};
pub use transport::{Body, HttpRequest, HttpResponse, ReqwestTransport, Transport};
