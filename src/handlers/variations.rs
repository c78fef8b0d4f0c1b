use axum::{Json, extract::{State, rejection::JsonRejection}, http::HeaderMap};
use serde_json::{Value, json};
use std::sync::Arc;
use crate::error::GatewayError;
use crate::handlers::{caller_identity, json_body};
use crate::models::VariationRequest;
use crate::state::AppState;

pub async fn variations_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<VariationRequest>, JsonRejection>,
) -> Result<Json<Value>, GatewayError> {
    let request = json_body(payload)?;
    tracing::info!(
        caller = %caller_identity(&headers),
        variation_type = request.variation_type.as_str(),
        "generating content variations"
    );

    let variations = state.ideas.generate_variations(&request).await?;

    Ok(Json(json!({
        "success": true,
        "data": variations,
        "message": "Content variations generated successfully",
        "metadata": {
            "original_idea_id": request.original_idea.id,
            "variation_type": request.variation_type,
            "variation_count": variations.len(),
        }
    })))
}
