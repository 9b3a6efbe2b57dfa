//! JSON body extractor that insists on an exact `Content-Type`.

use crate::errors::AppError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Extractor for JSON request bodies.
///
/// Unlike `axum::Json`, the `Content-Type` header must be exactly
/// `application/json`; parameters such as `charset` are rejected. A missing
/// or different header is answered with 415 before the body is read, and a
/// body that is not valid JSON for `T` with 400.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::StrictJson;
/// use serde_json::Value;
///
/// async fn create(StrictJson(body): StrictJson<Value>) -> String {
///     body.to_string()
/// }
/// ```
pub struct StrictJson<T>(pub T);

impl<T, S> FromRequest<S> for StrictJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());

        if content_type != Some(JSON_CONTENT_TYPE) {
            tracing::debug!(content_type = ?content_type, "Rejecting request body");
            return Err(AppError::UnsupportedMediaType(format!(
                "Content-Type must be {}",
                JSON_CONTENT_TYPE
            )));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let value = serde_json::from_slice(&bytes)?;
        Ok(StrictJson(value))
    }
}
