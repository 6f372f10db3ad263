use axum::Json;
use serde_json::{json, Value};

/// Public health/identity endpoint, usable as an uptime probe.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "active",
        "app": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_reports_active() {
        let Json(body) = health().await;

        assert_eq!(body["status"], "active");
        assert_eq!(body["app"], "powerhouse-api");
    }
}
