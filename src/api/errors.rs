use std::any::Any;
use std::sync::Arc;

use axum::{
    response::{IntoResponse, Response},
    Json,
};

use crate::application::FaultResponse;
use crate::domain::fault::{BusinessFault, Fault};

/// Result type for handlers answered through the fault translation layer
pub type ApiResult<T> = Result<T, Fault>;

/// Fault raised by a handler or extractor, waiting in the response
/// extensions for the translation layer to dispatch it
#[derive(Debug, Clone)]
pub struct PendingFault(pub Arc<Fault>);

impl PendingFault {
    pub fn fault(&self) -> &Fault {
        &self.0
    }
}

/// Error code of an envelope that has already been dispatched; such answers
/// are never translated again
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedFault(pub String);

impl IntoResponse for Fault {
    fn into_response(self) -> Response {
        let mut response = self.status().into_response();
        response
            .extensions_mut()
            .insert(PendingFault(Arc::new(self)));
        response
    }
}

impl IntoResponse for BusinessFault {
    fn into_response(self) -> Response {
        Fault::from(self).into_response()
    }
}

impl IntoResponse for FaultResponse {
    fn into_response(self) -> Response {
        let marker = TranslatedFault(self.body.code.clone());
        let mut response = (self.status, Json(self.body)).into_response();
        response.extensions_mut().insert(marker);
        response
    }
}

/// Panic handler for `CatchPanicLayer`; the payload is only ever logged
pub fn panic_fault(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    Fault::unclassified(anyhow::anyhow!("handler panicked: {detail}")).into_response()
}
