pub mod error_code;
pub mod error_response;
pub mod errors;
pub mod fault;
pub mod field_error;
pub mod value_objects;

pub use error_code::{ErrorCode, GlobalErrorCode};
pub use error_response::ErrorResponse;
pub use fault::{BusinessFault, Fault, FaultKind};
pub use field_error::{FieldError, Violation, GLOBAL_FIELD};
