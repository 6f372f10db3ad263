use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::warn;

use crate::api::handlers::AppState;

/// Extract the shared-secret key from the `x-api-key` header.
fn extract_api_key(headers: &HeaderMap) -> Option<&str> {
    headers.get("x-api-key").and_then(|h| h.to_str().ok())
}

/// Shared-secret gate for the device endpoints. A missing key is reported
/// differently from a wrong one so devices can tell misconfiguration from
/// rotation.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    match extract_api_key(request.headers()) {
        None => {
            warn!(uri = %request.uri(), "unauthorized: missing API key");
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "API Key required" })),
            )
                .into_response()
        }
        Some(key) if key != state.config.auth.api_key => {
            warn!(uri = %request.uri(), "unauthorized: invalid API key");
            (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "Invalid API Key" })),
            )
                .into_response()
        }
        Some(_) => next.run(request).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_api_key_present() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_static("secret123"));

        assert_eq!(extract_api_key(&headers), Some("secret123"));
    }

    #[test]
    fn test_extract_api_key_missing() {
        let headers = HeaderMap::new();
        assert_eq!(extract_api_key(&headers), None);
    }

    #[test]
    fn test_extract_api_key_case_insensitive_header_name() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Api-Key", HeaderValue::from_static("secret123"));

        assert_eq!(extract_api_key(&headers), Some("secret123"));
    }

    #[test]
    fn test_extract_api_key_non_utf8_value() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap());

        assert_eq!(extract_api_key(&headers), None);
    }
}
