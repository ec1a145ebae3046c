//! Error code registry
//!
//! Every failure that leaves the service carries a stable, upper snake-case
//! code bound to a transport status. Codes double as message-catalog keys.
//!
//! Applications declare their own registries by implementing [`ErrorCode`] on
//! an enum; nothing else in the crate needs to change when a code is added.

use http::StatusCode;

/// A statically known `(code, status)` pair.
pub trait ErrorCode: std::fmt::Debug + Send + Sync + 'static {
    /// Transport status returned for this code
    fn status(&self) -> StatusCode;

    /// Stable wire identifier, also used as the message template key
    fn code(&self) -> &'static str;
}

/// Built-in codes shared by every service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobalErrorCode {
    BadRequest,
    ValidationError,
    Unauthorized,
    Forbidden,
    NotFound,
    NoResourceFound,
    MethodNotAllowed,
    InvalidJson,
    TypeMismatch,
    InternalServerError,
}

impl GlobalErrorCode {
    /// Every built-in code, in declaration order
    pub const ALL: [GlobalErrorCode; 10] = [
        GlobalErrorCode::BadRequest,
        GlobalErrorCode::ValidationError,
        GlobalErrorCode::Unauthorized,
        GlobalErrorCode::Forbidden,
        GlobalErrorCode::NotFound,
        GlobalErrorCode::NoResourceFound,
        GlobalErrorCode::MethodNotAllowed,
        GlobalErrorCode::InvalidJson,
        GlobalErrorCode::TypeMismatch,
        GlobalErrorCode::InternalServerError,
    ];

    /// Reverse lookup by wire code.
    ///
    /// Not used when dispatching faults (producers hold the typed value); this
    /// exists for tooling such as catalog coverage checks.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}

impl ErrorCode for GlobalErrorCode {
    fn status(&self) -> StatusCode {
        match self {
            GlobalErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            GlobalErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            GlobalErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            GlobalErrorCode::Forbidden => StatusCode::FORBIDDEN,
            GlobalErrorCode::NotFound => StatusCode::NOT_FOUND,
            GlobalErrorCode::NoResourceFound => StatusCode::NOT_FOUND,
            GlobalErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            GlobalErrorCode::InvalidJson => StatusCode::BAD_REQUEST,
            GlobalErrorCode::TypeMismatch => StatusCode::BAD_REQUEST,
            GlobalErrorCode::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            GlobalErrorCode::BadRequest => "BAD_REQUEST",
            GlobalErrorCode::ValidationError => "VALIDATION_ERROR",
            GlobalErrorCode::Unauthorized => "UNAUTHORIZED",
            GlobalErrorCode::Forbidden => "FORBIDDEN",
            GlobalErrorCode::NotFound => "NOT_FOUND",
            GlobalErrorCode::NoResourceFound => "NO_RESOURCE_FOUND",
            GlobalErrorCode::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            GlobalErrorCode::InvalidJson => "INVALID_JSON",
            GlobalErrorCode::TypeMismatch => "TYPE_MISMATCH",
            GlobalErrorCode::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl std::fmt::Display for GlobalErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
