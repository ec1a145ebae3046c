//! Request correlation
//!
//! Every request gets a [`RequestId`]: the caller's `x-request-id` when it is
//! usable, a fresh UUID v4 otherwise. The ID is visible to handlers as a
//! request extension, echoed on the response and attached to the completion
//! log line together with the code of any translated fault.

use std::fmt;
use std::time::Instant;

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::info;
use uuid::Uuid;

use crate::api::errors::TranslatedFault;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest caller-supplied ID that is kept
const MAX_REQUEST_ID_LEN: usize = 128;

/// Correlation ID of one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    /// The caller's ID if acceptable, else a generated one
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| Self::is_acceptable(value))
            .map(|value| Self(value.to_string()))
            .unwrap_or_else(Self::generate)
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Non-empty, bounded, visible ASCII only
    fn is_acceptable(value: &str) -> bool {
        !value.is_empty()
            && value.len() <= MAX_REQUEST_ID_LEN
            && value.bytes().all(|b| b.is_ascii_graphic())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tag the request with its [`RequestId`] and log its outcome.
///
/// Runs outside the fault translation layer, so the status and fault code
/// logged here are the translated ones.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let started = Instant::now();
    let request_id = RequestId::from_headers(request.headers());
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    request.extensions_mut().insert(request_id.clone());

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    let elapsed_ms = started.elapsed().as_millis();
    let status = response.status().as_u16();
    match response.extensions().get::<TranslatedFault>() {
        Some(TranslatedFault(code)) => info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            fault_code = %code,
            elapsed_ms,
            "request_faulted"
        ),
        None => info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            elapsed_ms,
            "request_completed"
        ),
    }

    response
}
