use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, StatusCode},
    response::Response,
};

use crate::api::errors::{PendingFault, TranslatedFault};
use crate::domain::error_code::GlobalErrorCode;
use crate::domain::fault::{BusinessFault, Fault};

/// Most of a bare error body kept as fault detail
const BARE_BODY_LIMIT: usize = 64 * 1024;

/// Response inspection helpers for the translation service
pub struct FaultUtils;

impl FaultUtils {
    /// Remove and return the fault a handler left in the response
    pub fn take_pending(response: &mut Response) -> Option<Arc<Fault>> {
        response
            .extensions_mut()
            .remove::<PendingFault>()
            .map(|pending| pending.0)
    }

    /// 405 answered by the router itself rather than by a raised fault
    pub fn is_bare_method_not_allowed(response: &Response) -> bool {
        response.status() == StatusCode::METHOD_NOT_ALLOWED
            && response.extensions().get::<PendingFault>().is_none()
    }

    /// Error answer produced without a fault, e.g. an axum extractor
    /// rejection or a handler returning a plain status
    pub fn is_bare_error(response: &Response) -> bool {
        let status = response.status();
        (status.is_client_error() || status.is_server_error())
            && response.extensions().get::<PendingFault>().is_none()
            && response.extensions().get::<TranslatedFault>().is_none()
    }

    /// Fault standing in for a bare error answer.
    ///
    /// Payload statuses become malformed payload faults, 404 becomes the
    /// route-not-found fault, 401 and 403 map to their registry codes and
    /// anything else lands in the catch-all. `detail` is only logged.
    pub fn bare_fault(status: StatusCode, method: Method, path: String, detail: String) -> Fault {
        match status {
            StatusCode::BAD_REQUEST
            | StatusCode::PAYLOAD_TOO_LARGE
            | StatusCode::UNSUPPORTED_MEDIA_TYPE
            | StatusCode::UNPROCESSABLE_ENTITY => Fault::MalformedPayload(detail),
            StatusCode::NOT_FOUND => Fault::NoRoute { method, path },
            StatusCode::UNAUTHORIZED => BusinessFault::new(GlobalErrorCode::Unauthorized).into(),
            StatusCode::FORBIDDEN => BusinessFault::new(GlobalErrorCode::Forbidden).into(),
            status => Fault::unclassified(anyhow::anyhow!(
                "{method} {path} answered {status} without a fault: {detail}"
            )),
        }
    }

    /// Body of a bare error answer as text; empty when unreadable
    pub async fn body_text(body: Body) -> String {
        to_bytes(body, BARE_BODY_LIMIT)
            .await
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default()
    }

    /// Methods listed in the `Allow` header, in header order. Unparseable
    /// entries are skipped.
    pub fn allowed_methods(headers: &HeaderMap) -> Vec<Method> {
        headers
            .get_all(header::ALLOW)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(','))
            .map(str::trim)
            .filter(|method| !method.is_empty())
            .filter_map(|method| Method::from_bytes(method.as_bytes()).ok())
            .collect()
    }
}
