use serde::{Deserialize, Serialize};

use super::error_code::ErrorCode;

/// Uniform error envelope: `{ "code", "message", "details"? }`
///
/// `details` is left out of the serialized form when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse<T> {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<T>,
}

impl<T> ErrorResponse<T> {
    pub fn of(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(code: impl Into<String>, message: impl Into<String>, details: T) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details),
        }
    }

    /// Envelope for a registry code
    pub fn for_code(error_code: &dyn ErrorCode, message: impl Into<String>) -> Self {
        Self::of(error_code.code(), message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error_code::GlobalErrorCode;
    use crate::domain::field_error::FieldError;
    use serde_json::json;

    #[test]
    fn test_details_omitted_when_absent() {
        let response: ErrorResponse<Vec<FieldError>> =
            ErrorResponse::for_code(&GlobalErrorCode::NotFound, "요청하신 리소스를 찾을 수 없습니다.");
        let text = serde_json::to_string(&response).unwrap();

        assert!(!text.contains("details"));
        assert!(!text.contains("null"));
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&text).unwrap(),
            json!({"code": "NOT_FOUND", "message": "요청하신 리소스를 찾을 수 없습니다."})
        );
    }

    #[test]
    fn test_details_present() {
        let response = ErrorResponse::with_details(
            "VALIDATION_ERROR",
            "invalid",
            vec![FieldError::new("name", Some(json!("")), "must not be blank")],
        );
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["details"][0]["field"], "name");
        assert_eq!(value["details"][0]["value"], "");
        assert_eq!(value["details"][0]["reason"], "must not be blank");
    }

    #[test]
    fn test_empty_details_are_still_emitted() {
        let response: ErrorResponse<Vec<FieldError>> =
            ErrorResponse::with_details("VALIDATION_ERROR", "invalid", Vec::new());
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["details"], json!([]));
    }
}
