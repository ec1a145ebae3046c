use std::sync::Arc;

use http::{Method, StatusCode};
use tracing::{debug, error, warn};

use crate::application::diagnostics::extract;
use crate::application::ports::MessageResolver;
use crate::domain::error_code::{ErrorCode, GlobalErrorCode};
use crate::domain::error_response::ErrorResponse;
use crate::domain::fault::{BusinessFault, Fault, FaultKind};
use crate::domain::field_error::FieldError;

/// Envelope type answered for every fault
pub type FaultBody = ErrorResponse<Vec<FieldError>>;

/// Status and body produced for one fault
#[derive(Debug, Clone, PartialEq)]
pub struct FaultResponse {
    pub status: StatusCode,
    pub body: FaultBody,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Log 4xx faults other than business faults at `warn` instead of `debug`
    pub log_client_errors: bool,
}

/// Translates faults into response envelopes.
///
/// The branch is chosen by [`FaultKind::classify`]; messages come from the
/// resolver unless a business fault carries its own. Dispatch never fails.
#[derive(Clone)]
pub struct FaultDispatcher {
    resolver: Arc<dyn MessageResolver>,
    config: DispatcherConfig,
}

impl FaultDispatcher {
    pub fn new(resolver: Arc<dyn MessageResolver>) -> Self {
        Self {
            resolver,
            config: DispatcherConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DispatcherConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> DispatcherConfig {
        self.config
    }

    pub fn resolver(&self) -> &Arc<dyn MessageResolver> {
        &self.resolver
    }

    pub fn dispatch(&self, fault: &Fault) -> FaultResponse {
        let kind = fault.kind();

        let response = match (kind, fault) {
            (FaultKind::Business, _) => match fault.business_fault() {
                Some(business) => self.business(business),
                None => self.respond(&GlobalErrorCode::InternalServerError, &[], None),
            },
            (FaultKind::BodyValidation, Fault::BodyValidation(violations))
            | (FaultKind::ParameterValidation, Fault::ParameterValidation(violations)) => self
                .respond(
                    &GlobalErrorCode::ValidationError,
                    &[],
                    Some(extract(violations.iter().cloned())),
                ),
            (FaultKind::MethodNotAllowed, Fault::MethodNotAllowed { method, allowed }) => self
                .respond(
                    &GlobalErrorCode::MethodNotAllowed,
                    &[method_argument(method, allowed)],
                    None,
                ),
            (FaultKind::TypeMismatch, Fault::TypeMismatch { parameter, value }) => self.respond(
                &GlobalErrorCode::TypeMismatch,
                &[parameter.clone(), value.clone()],
                None,
            ),
            (kind, _) => self.respond(&kind.error_code(), &[], None),
        };

        self.log(kind, fault, &response);
        response
    }

    fn business(&self, fault: &BusinessFault) -> FaultResponse {
        let code = fault.error_code();
        let message = match fault.explicit_message() {
            Some(message) => message.to_string(),
            None => self.resolver.resolve(code.code(), fault.error_args()),
        };

        FaultResponse {
            status: code.status(),
            body: ErrorResponse::for_code(code, message),
        }
    }

    fn respond(
        &self,
        code: &dyn ErrorCode,
        args: &[String],
        details: Option<Vec<FieldError>>,
    ) -> FaultResponse {
        let message = self.resolver.resolve(code.code(), args);
        let body = match details {
            Some(details) => ErrorResponse::with_details(code.code(), message, details),
            None => ErrorResponse::for_code(code, message),
        };

        FaultResponse {
            status: code.status(),
            body,
        }
    }

    fn log(&self, kind: FaultKind, fault: &Fault, response: &FaultResponse) {
        let status = response.status.as_u16();
        let code = response.body.code.as_str();
        let detail = format!("{fault:#}");

        if response.status.is_server_error() {
            error!(kind = %kind, code = %code, status = status, error = %detail, "fault_dispatched");
        } else if kind == FaultKind::Business || self.config.log_client_errors {
            warn!(kind = %kind, code = %code, status = status, error = %detail, "fault_dispatched");
        } else {
            debug!(kind = %kind, code = %code, status = status, error = %detail, "fault_dispatched");
        }
    }
}

/// Interpolation argument for `METHOD_NOT_ALLOWED`: the methods the route
/// accepts, or the attempted one when those are unknown
fn method_argument(method: &Method, allowed: &[Method]) -> String {
    if allowed.is_empty() {
        return method.to_string();
    }
    allowed
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
