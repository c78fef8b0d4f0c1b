use axum::{Json, extract::{State, rejection::JsonRejection}, http::HeaderMap};
use serde_json::{Value, json};
use std::sync::Arc;
use crate::error::GatewayError;
use crate::handlers::{caller_identity, json_body};
use crate::models::ContentIdeaRequest;
use crate::state::AppState;

pub async fn generate_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<ContentIdeaRequest>, JsonRejection>,
) -> Result<Json<Value>, GatewayError> {
    let request = json_body(payload)?;
    let caller = caller_identity(&headers);
    tracing::info!(caller = %caller, idea_count = request.idea_count, "generating content ideas");

    let ideas = state.ideas.generate_content_ideas(&request, &caller).await?;

    Ok(Json(json!({
        "success": true,
        "data": ideas,
        "message": "Content ideas generated successfully",
        "metadata": {
            "idea_count": ideas.len(),
            "platforms": request.effective_platforms(),
            "creativity_level": request.creativity_level,
        }
    })))
}
