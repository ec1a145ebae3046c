//! Routes that raise each kind of fault, served by the demo binary

use std::borrow::Cow;

use anyhow::Context;
use axum::{
    extract::{rejection::JsonRejection, Path},
    Json,
};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::api::errors::ApiResult;
use crate::api::extractors::{json_rejection, TypedPath, ValidatedJson, ValidatedPath, ValidatedQuery};
use crate::domain::error_code::GlobalErrorCode;
use crate::domain::fault::{BusinessFault, Fault};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank").with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PersonRequest {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(range(min = 1, message = "must be greater than or equal to 1"))]
    pub age: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct IdParam {
    #[validate(custom(function = "not_blank"))]
    pub id: String,
}

/// GET /test/app-ex
pub async fn business_fault_handler() -> ApiResult<()> {
    Err(BusinessFault::new(GlobalErrorCode::NotFound).into())
}

/// GET /test/app-ex-custom
/// Business fault with a pre-rendered message
pub async fn custom_message_handler() -> ApiResult<()> {
    Err(BusinessFault::with_message(
        GlobalErrorCode::NotFound,
        "MessageResolver를 사용하지 않은 커스텀 메세지",
    )
    .into())
}

fn load_order(id: &str) -> Result<(), BusinessFault> {
    Err(BusinessFault::with_args(GlobalErrorCode::Forbidden, [id]))
}

/// GET /test/app-ex-wrapped/{id}
/// Business fault reaching the handler inside an `anyhow` chain
pub async fn wrapped_business_fault_handler(Path(id): Path<String>) -> ApiResult<()> {
    load_order(&id).with_context(|| format!("loading order {id}"))?;
    Ok(())
}

/// POST /test/invalid-request-body
pub async fn invalid_body_handler(ValidatedJson(_request): ValidatedJson<PersonRequest>) {}

/// GET /test/invalid-path-variable/{id}
pub async fn invalid_path_variable_handler(ValidatedPath(_param): ValidatedPath<IdParam>) {}

/// GET /test/invalid-request-parm?id=
pub async fn invalid_request_param_handler(ValidatedQuery(_param): ValidatedQuery<IdParam>) {}

/// GET /test/ex
pub async fn unclassified_handler() -> ApiResult<()> {
    Err(Fault::unclassified(anyhow::anyhow!("boom")))
}

/// GET /test/panic
pub async fn panic_handler() -> &'static str {
    panic!("boom")
}

/// POST /test/invalid-method
pub async fn post_only_handler() -> &'static str {
    "ok"
}

/// POST /test/invalid-json
pub async fn json_handler(
    payload: Result<Json<PersonRequest>, JsonRejection>,
) -> ApiResult<Json<PersonRequest>> {
    let Json(request) = payload.map_err(json_rejection)?;
    Ok(Json(request))
}

/// GET /test/mismatch/{id}
pub async fn type_mismatch_handler(TypedPath(id): TypedPath<i64>) -> String {
    id.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("kim").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank("  ").is_err());
    }

    #[test]
    fn test_person_request_validation() {
        let valid = PersonRequest {
            name: "kim".to_string(),
            age: 20,
        };
        let invalid = PersonRequest {
            name: " ".to_string(),
            age: 0,
        };

        assert!(valid.validate().is_ok());
        let errors = invalid.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 2);
    }

    #[tokio::test]
    async fn test_wrapped_business_fault_keeps_code() {
        let fault = wrapped_business_fault_handler(Path("42".to_string()))
            .await
            .unwrap_err();

        let business = fault.business_fault().unwrap();
        assert_eq!(business.code(), "FORBIDDEN");
        assert_eq!(business.error_args(), ["42"]);
    }
}
