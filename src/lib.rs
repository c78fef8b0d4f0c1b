pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod ideas;
pub mod metrics;
pub mod models;
pub mod parser;
pub mod prompt;
pub mod provider;
pub mod rate_limit;
pub mod state;

#[cfg(test)]
pub mod test_utils;

pub use error::{GatewayError, GatewayResult};
pub use gateway::{CompletionRequest, Gateway};
pub use ideas::ContentIdeaService;
pub use models::{ContentIdea, ContentIdeaRequest};
