//! JSON body extractor that tolerates missing bodies and content types.

use crate::errors::AppError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::error::Category;

/// JSON extractor for clients that are not strict about their requests.
///
/// - No `Content-Type` check: the body is parsed as JSON whatever the header says.
/// - An empty (or whitespace-only) body deserializes as `T::default()`.
/// - A body over the router's `DefaultBodyLimit` is rejected with a 413 `PAYLOAD_TOO_LARGE`.
/// - Malformed JSON is rejected with a 400 `VALIDATION_ERROR` ("Invalid JSON body").
/// - Well-formed JSON of the wrong shape is rejected with the deserializer's message.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::LenientJson;
///
/// #[derive(Default, Deserialize)]
/// struct CreateTask {
///     title: Option<String>,
/// }
///
/// async fn create(LenientJson(input): LenientJson<CreateTask>) -> String {
///     input.title.unwrap_or_default()
/// }
/// ```
pub struct LenientJson<T>(pub T);

impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge(e.body_text())
            } else {
                AppError::Validation(e.body_text())
            }
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(LenientJson(T::default()));
        }

        serde_json::from_slice(&bytes)
            .map(LenientJson)
            .map_err(|e| match e.classify() {
                Category::Data => AppError::Validation(format!("Invalid request body: {}", e)),
                Category::Syntax | Category::Eof | Category::Io => {
                    AppError::Validation("Invalid JSON body".to_string())
                }
            })
    }
}
