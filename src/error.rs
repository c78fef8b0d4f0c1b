use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Text-generation backend failed or returned nothing usable
    #[error("[{provider}] AI service failed: {message}")]
    Provider { provider: String, message: String },

    #[error("Rate limit exceeded for '{key}'. Please try again later.")]
    RateLimitExceeded { key: String },

    /// Provider output did not match the expected JSON shape
    #[error("Failed to parse AI response: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GatewayError {
    pub fn provider(provider: &str, message: impl Into<String>) -> Self {
        GatewayError::Provider {
            provider: provider.to_string(),
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Provider { .. } => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::RateLimitExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            GatewayError::Parse(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            GatewayError::Provider { .. } => "AI_SERVICE_ERROR",
            GatewayError::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",
            GatewayError::Parse(_) => "PARSE_ERROR",
            GatewayError::Validation(_) => "VALIDATION_ERROR",
            GatewayError::Config(_) => "INTERNAL_ERROR",
        }
    }

    // What the end user sees; provider and parse details stay in the logs
    fn public_parts(&self) -> (&'static str, String) {
        match self {
            GatewayError::Provider { .. } => (
                "AI service error",
                "Unable to generate content at the moment. Please try again.".to_string(),
            ),
            GatewayError::RateLimitExceeded { .. } => (
                "Rate limit exceeded",
                "Too many requests. Please try again in an hour.".to_string(),
            ),
            GatewayError::Parse(_) => (
                "Invalid AI response",
                "The AI response could not be understood. Please try again.".to_string(),
            ),
            GatewayError::Validation(msg) => ("Validation error", msg.clone()),
            GatewayError::Config(_) => (
                "Internal server error",
                "An unexpected error occurred. Please try again.".to_string(),
            ),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (error, message) = self.public_parts();

        let body = Json(json!({
            "success": false,
            "error": error,
            "message": message,
            "code": self.error_code(),
        }));

        (status, body).into_response()
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
