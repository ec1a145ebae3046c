//! Extractors whose rejections are faults
//!
//! Each wraps the matching axum extractor, maps its rejection to a [`Fault`]
//! and then runs `validator` on the extracted value.

use axum::{
    extract::{
        path::ErrorKind,
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query, RawPathParams, Request,
    },
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::application::diagnostics::violations_for;
use crate::domain::fault::Fault;

/// JSON body, validated; failures become body validation faults
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

/// Path parameters, validated; failures become parameter validation faults
#[derive(Debug, Clone)]
pub struct ValidatedPath<T>(pub T);

/// Path parameters without validation; parse failures become type mismatches
#[derive(Debug, Clone)]
pub struct TypedPath<T>(pub T);

/// Query string, validated; failures become parameter validation faults
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Fault;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;

        value
            .validate()
            .map_err(|errors| Fault::BodyValidation(violations_for::<T>(&errors)))?;
        Ok(Self(value))
    }
}

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = Fault;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let value = extract_path::<T, S>(parts, state).await?;

        value
            .validate()
            .map_err(|errors| Fault::ParameterValidation(violations_for::<T>(&errors)))?;
        Ok(Self(value))
    }
}

impl<T, S> FromRequestParts<S> for TypedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Fault;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        extract_path::<T, S>(parts, state).await.map(Self)
    }
}

async fn extract_path<T, S>(parts: &mut Parts, state: &S) -> Result<T, Fault>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    match Path::<T>::from_request_parts(parts, state).await {
        Ok(Path(value)) => Ok(value),
        Err(rejection) => {
            let names: Vec<String> = match RawPathParams::from_request_parts(parts, state).await {
                Ok(params) => params.iter().map(|(name, _)| name.to_string()).collect(),
                Err(_) => Vec::new(),
            };
            Err(path_rejection(rejection, &names))
        }
    }
}

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Fault;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw_query = parts.uri.query().unwrap_or_default().to_string();
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| query_rejection(rejection, &raw_query))?;

        value
            .validate()
            .map_err(|errors| Fault::ParameterValidation(violations_for::<T>(&errors)))?;
        Ok(Self(value))
    }
}

/// Any JSON body rejection: syntax, data shape, content type or unreadable body
pub fn json_rejection(rejection: JsonRejection) -> Fault {
    Fault::MalformedPayload(rejection.body_text())
}

/// Path rejection; parse failures name the parameter and its raw value.
///
/// `names` are the route's parameter names in path order. Primitive and
/// tuple targets are reported by position, so the name is looked up there.
pub fn path_rejection(rejection: PathRejection, names: &[String]) -> Fault {
    match rejection {
        PathRejection::FailedToDeserializePathParams(error) => match error.into_kind() {
            ErrorKind::ParseErrorAtKey { key, value, .. }
            | ErrorKind::DeserializeError { key, value, .. } => Fault::type_mismatch(key, value),
            ErrorKind::ParseErrorAtIndex { index, value, .. } => {
                let name = names
                    .get(index)
                    .cloned()
                    .unwrap_or_else(|| index.to_string());
                Fault::type_mismatch(name, value)
            }
            ErrorKind::ParseError { value, .. } => {
                let name = match names {
                    [only] => only.clone(),
                    _ => "path".to_string(),
                };
                Fault::type_mismatch(name, value)
            }
            ErrorKind::InvalidUtf8InPathParam { key } => Fault::type_mismatch(key, ""),
            other => Fault::unclassified(anyhow::anyhow!("path extraction failed: {other}")),
        },
        other => Fault::unclassified(anyhow::anyhow!(
            "path extraction failed: {}",
            other.body_text()
        )),
    }
}

/// Query rejection. The deserializer does not report which key failed, so
/// the whole raw query is reported under the name `query`.
pub fn query_rejection(rejection: QueryRejection, raw_query: &str) -> Fault {
    match rejection {
        QueryRejection::FailedToDeserializeQueryString(_) => {
            Fault::type_mismatch("query", raw_query)
        }
        other => Fault::unclassified(anyhow::anyhow!(
            "query extraction failed: {}",
            other.body_text()
        )),
    }
}
