mod generate;
mod health;
mod metrics;
mod preferences;
mod usage;
mod variations;

pub use generate::generate_handler;
pub use health::health_handler;
pub use metrics::metrics_handler;
pub use preferences::preferences_handler;
pub use usage::usage_handler;
pub use variations::variations_handler;

use std::sync::Arc;
use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    http::HeaderMap,
    routing::{get, post},
};
use crate::error::GatewayError;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/content-ideas", get(usage_handler))
        .route("/api/content-ideas/generate", post(generate_handler))
        .route("/api/content-ideas/variations", post(variations_handler))
        .route("/api/content-ideas/preferences", post(preferences_handler))
        .with_state(state)
}

// Rate-limit identity: explicit user id, then proxy headers, then anonymous
pub fn caller_identity(headers: &HeaderMap) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    header("x-user-id")
        .or_else(|| {
            header("x-forwarded-for")
                .and_then(|v| v.split(',').next())
                .map(str::trim)
        })
        .or_else(|| header("x-real-ip"))
        .unwrap_or("anonymous")
        .to_string()
}

// Malformed bodies are reported like any other validation failure
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, GatewayError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| GatewayError::Validation(rejection.body_text()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn caller_identity_precedence() {
        let mut headers = HeaderMap::new();
        assert_eq!(caller_identity(&headers), "anonymous");

        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.9"));
        assert_eq!(caller_identity(&headers), "10.0.0.9");

        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.5, 10.0.0.1"));
        assert_eq!(caller_identity(&headers), "203.0.113.5");

        headers.insert("x-user-id", HeaderValue::from_static("user-42"));
        assert_eq!(caller_identity(&headers), "user-42");
    }
}
