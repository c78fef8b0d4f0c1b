use axum::{Json, extract::{State, rejection::JsonRejection}};
use serde_json::{Value, json};
use std::sync::Arc;
use crate::error::GatewayError;
use crate::handlers::json_body;
use crate::models::PreferenceLearningRequest;
use crate::state::AppState;

// Fold submitted feedback into the caller's content preferences
pub async fn preferences_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PreferenceLearningRequest>, JsonRejection>,
) -> Result<Json<Value>, GatewayError> {
    let request = json_body(payload)?;
    let preferences = state
        .ideas
        .learn_from_feedback(&request.feedback, &request.preferences)
        .await?;

    Ok(Json(json!({
        "success": true,
        "data": preferences,
        "message": "Preferences updated",
        "metadata": { "feedback_count": request.feedback.len() }
    })))
}
