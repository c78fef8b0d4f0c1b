use std::sync::Arc;
use crate::gateway::Gateway;
use crate::ideas::ContentIdeaService;

// app's shared state
pub struct AppState {
    pub ideas: ContentIdeaService,
}

impl AppState {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self {
            ideas: ContentIdeaService::new(gateway),
        }
    }

    pub fn gateway(&self) -> &Arc<Gateway> {
        self.ideas.gateway()
    }
}
