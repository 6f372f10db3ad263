use axum::{
    extract::Request,
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{warn, Level};

use crate::api::handlers::{health, iot, AppState};
use crate::auth::require_api_key;

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors.allowed_origin);

    // Public routes (no API key required)
    let public_routes = Router::new().route("/", get(health::health));

    // Device endpoints (require the shared-secret header)
    let protected_routes = Router::new()
        .route("/api/iot/data", post(iot::ingest_data))
        .route("/api/iot/status", get(iot::get_status))
        .route("/api/iot/control", post(iot::control))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::span!(
                    Level::INFO,
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
}

fn cors_layer(allowed_origin: &str) -> CorsLayer {
    if allowed_origin == "*" {
        return CorsLayer::permissive();
    }

    match allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(_) => {
            warn!(
                origin = allowed_origin,
                "CORS_ORIGIN is not a valid header value, falling back to permissive"
            );
            CorsLayer::permissive()
        }
    }
}
