//! Failure values raised while handling a request
//!
//! [`BusinessFault`] is what application code raises on purpose. [`Fault`] is
//! the closed set of failures the dispatcher knows how to answer, including
//! the transport-shaped ones produced by request extraction and routing.

use std::fmt;

use http::{Method, StatusCode};
use thiserror::Error;

use super::error_code::{ErrorCode, GlobalErrorCode};
use super::field_error::Violation;

/// Failure raised by application logic, carrying a registry code
pub struct BusinessFault {
    error_code: Box<dyn ErrorCode>,
    error_args: Vec<String>,
    explicit_message: Option<String>,
}

impl BusinessFault {
    pub fn new(error_code: impl ErrorCode) -> Self {
        Self {
            error_code: Box::new(error_code),
            error_args: Vec::new(),
            explicit_message: None,
        }
    }

    /// Fault whose message is interpolated from `args`, in order
    pub fn with_args<I, A>(error_code: impl ErrorCode, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: fmt::Display,
    {
        Self {
            error_code: Box::new(error_code),
            error_args: args.into_iter().map(|a| a.to_string()).collect(),
            explicit_message: None,
        }
    }

    /// Fault with a pre-rendered message; message resolution is skipped
    pub fn with_message(error_code: impl ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error_code: Box::new(error_code),
            error_args: Vec::new(),
            explicit_message: Some(message.into()),
        }
    }

    /// Append one interpolation argument
    pub fn arg(mut self, arg: impl fmt::Display) -> Self {
        self.error_args.push(arg.to_string());
        self
    }

    pub fn error_code(&self) -> &dyn ErrorCode {
        self.error_code.as_ref()
    }

    pub fn status(&self) -> StatusCode {
        self.error_code.status()
    }

    pub fn code(&self) -> &'static str {
        self.error_code.code()
    }

    pub fn error_args(&self) -> &[String] {
        &self.error_args
    }

    pub fn explicit_message(&self) -> Option<&str> {
        self.explicit_message.as_deref()
    }
}

impl fmt::Debug for BusinessFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BusinessFault")
            .field("code", &self.code())
            .field("status", &self.status().as_u16())
            .field("error_args", &self.error_args)
            .field("explicit_message", &self.explicit_message)
            .finish()
    }
}

impl fmt::Display for BusinessFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.explicit_message {
            Some(message) => write!(f, "{}: {}", self.code(), message),
            None if self.error_args.is_empty() => write!(f, "{}", self.code()),
            None => write!(f, "{} {:?}", self.code(), self.error_args),
        }
    }
}

impl std::error::Error for BusinessFault {}

/// Every failure the dispatcher answers
#[derive(Debug, Error)]
pub enum Fault {
    #[error("business fault: {0}")]
    Business(#[from] BusinessFault),

    #[error("request body failed validation ({} violations)", .0.len())]
    BodyValidation(Vec<Violation>),

    #[error("request parameters failed validation ({} violations)", .0.len())]
    ParameterValidation(Vec<Violation>),

    #[error("method {method} not supported")]
    MethodNotAllowed { method: Method, allowed: Vec<Method> },

    #[error("malformed request payload: {0}")]
    MalformedPayload(String),

    #[error("cannot convert value '{value}' of parameter '{parameter}'")]
    TypeMismatch { parameter: String, value: String },

    #[error("no route for {method} {path}")]
    NoRoute { method: Method, path: String },

    #[error(transparent)]
    Unclassified(#[from] anyhow::Error),
}

impl Fault {
    /// Wrap any error as an unclassified fault
    pub fn unclassified(error: impl Into<anyhow::Error>) -> Self {
        Fault::Unclassified(error.into())
    }

    pub fn type_mismatch(parameter: impl Into<String>, value: impl Into<String>) -> Self {
        Fault::TypeMismatch {
            parameter: parameter.into(),
            value: value.into(),
        }
    }

    /// Business fault carried by this value, directly or anywhere in an
    /// unclassified error chain
    pub fn business_fault(&self) -> Option<&BusinessFault> {
        match self {
            Fault::Business(fault) => Some(fault),
            Fault::Unclassified(error) => error
                .chain()
                .find_map(|cause| cause.downcast_ref::<BusinessFault>()),
            _ => None,
        }
    }

    /// Kind selected by the priority table
    pub fn kind(&self) -> FaultKind {
        FaultKind::classify(self)
    }

    /// Status this fault will be answered with
    pub fn status(&self) -> StatusCode {
        match self.kind() {
            FaultKind::Business => self
                .business_fault()
                .map(BusinessFault::status)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            kind => kind.error_code().status(),
        }
    }
}

/// Handling branch for a fault, listed in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    Business,
    BodyValidation,
    ParameterValidation,
    MethodNotAllowed,
    MalformedPayload,
    TypeMismatch,
    NoRoute,
    Unclassified,
}

impl FaultKind {
    /// Evaluation order; the first kind whose predicate holds wins
    pub const PRIORITY: [FaultKind; 8] = [
        FaultKind::Business,
        FaultKind::BodyValidation,
        FaultKind::ParameterValidation,
        FaultKind::MethodNotAllowed,
        FaultKind::MalformedPayload,
        FaultKind::TypeMismatch,
        FaultKind::NoRoute,
        FaultKind::Unclassified,
    ];

    /// Capability check for this branch
    pub fn matches(self, fault: &Fault) -> bool {
        match self {
            FaultKind::Business => fault.business_fault().is_some(),
            FaultKind::BodyValidation => matches!(fault, Fault::BodyValidation(_)),
            FaultKind::ParameterValidation => matches!(fault, Fault::ParameterValidation(_)),
            FaultKind::MethodNotAllowed => matches!(fault, Fault::MethodNotAllowed { .. }),
            FaultKind::MalformedPayload => matches!(fault, Fault::MalformedPayload(_)),
            FaultKind::TypeMismatch => matches!(fault, Fault::TypeMismatch { .. }),
            FaultKind::NoRoute => matches!(fault, Fault::NoRoute { .. }),
            FaultKind::Unclassified => true,
        }
    }

    pub fn classify(fault: &Fault) -> FaultKind {
        Self::PRIORITY
            .into_iter()
            .find(|kind| kind.matches(fault))
            .unwrap_or(FaultKind::Unclassified)
    }

    /// Registry code answered for this branch. Business faults carry their
    /// own code; `BadRequest` is returned only as a placeholder for them.
    pub fn error_code(self) -> GlobalErrorCode {
        match self {
            FaultKind::Business => GlobalErrorCode::BadRequest,
            FaultKind::BodyValidation | FaultKind::ParameterValidation => {
                GlobalErrorCode::ValidationError
            }
            FaultKind::MethodNotAllowed => GlobalErrorCode::MethodNotAllowed,
            FaultKind::MalformedPayload => GlobalErrorCode::InvalidJson,
            FaultKind::TypeMismatch => GlobalErrorCode::TypeMismatch,
            FaultKind::NoRoute => GlobalErrorCode::NoResourceFound,
            FaultKind::Unclassified => GlobalErrorCode::InternalServerError,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FaultKind::Business => "business",
            FaultKind::BodyValidation => "body_validation",
            FaultKind::ParameterValidation => "parameter_validation",
            FaultKind::MethodNotAllowed => "method_not_allowed",
            FaultKind::MalformedPayload => "malformed_payload",
            FaultKind::TypeMismatch => "type_mismatch",
            FaultKind::NoRoute => "no_route",
            FaultKind::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
