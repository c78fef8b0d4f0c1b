use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;
use std::sync::Arc;
use crate::models::{MAX_IDEA_COUNT, MAX_VARIATION_COUNT, SUPPORTED_PLATFORMS};
use crate::state::AppState;

pub async fn usage_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let gateway = state.gateway();
    let limiter = gateway.rate_limiter();

    Json(json!({
        "message": "Content Ideas Generation API",
        "version": env!("CARGO_PKG_VERSION"),
        "provider": gateway.provider_name(),
        "endpoints": {
            "POST /api/content-ideas/generate": "Generate AI-powered content ideas",
            "POST /api/content-ideas/variations": "Generate variations of existing ideas",
            "POST /api/content-ideas/preferences": "Update content preferences from feedback"
        },
        "usage": {
            "rate_limit": format!(
                "{} requests per {} seconds per user",
                limiter.limit(),
                limiter.window().as_secs()
            ),
            "max_ideas_per_request": MAX_IDEA_COUNT,
            "max_variations_per_request": MAX_VARIATION_COUNT,
            "supported_platforms": SUPPORTED_PLATFORMS,
            "supported_content_types": ["video", "carousel", "story", "reel", "post", "short", "live"]
        }
    }))
}
