//! JSON body extractor with uniform error responses.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use common::AppError;

/// JSON extractor that reports any rejection as `MalformedInput`.
///
/// Covers a missing or wrong content type, invalid JSON syntax, a body that
/// is not a JSON object and values of the wrong JSON type.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| AppError::malformed_input(e.body_text()))?;

        // Derived struct deserializers also accept sequences
        if !value.is_object() {
            return Err(AppError::malformed_input(
                "Request body must be a JSON object",
            ));
        }

        let payload = serde_json::from_value(value)
            .map_err(|e| AppError::malformed_input(format!("Invalid request body: {}", e)))?;

        Ok(JsonBody(payload))
    }
}
