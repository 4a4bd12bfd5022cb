use axum::http::{HeaderValue, Method, header};
use std::io;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::info;

const ALLOWED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];

/// Creates the CORS layer for the API.
///
/// `allowed_origins` is either `*` (any origin, no credentials) or a
/// comma-separated list of origins. Methods are GET, POST, PUT, DELETE and
/// OPTIONS; request headers `Content-Type` and `Authorization` are allowed.
/// Preflight requests are answered by the layer itself with 200 and no body.
///
/// # Errors
/// Returns `InvalidInput` if the list is empty or contains a value that is not
/// a valid header value.
pub fn create_cors_layer(allowed_origins: &str) -> io::Result<CorsLayer> {
    let allowed_origins = allowed_origins.trim();

    let allow_origin = if allowed_origins == "*" {
        AllowOrigin::from(Any)
    } else {
        let origins = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
                )
            })?;

        if origins.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "CORS_ALLOWED_ORIGIN cannot be empty",
            ));
        }

        AllowOrigin::list(origins)
    };

    info!("CORS configured with allowed origins: {}", allowed_origins);

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}
