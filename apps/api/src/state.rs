use std::sync::Arc;

use crate::chat::ChatAssistant;
use crate::llm_client::{CompletionProvider, KeyRotator};
use crate::recommendations::RecommendationDispatcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Kept for `/health`; the services hold their own handle.
    pub rotator: Arc<KeyRotator>,
    pub recommender: RecommendationDispatcher,
    pub chat: ChatAssistant,
}

impl AppState {
    /// Wires both AI services to one rotator and one provider.
    pub fn new(rotator: Arc<KeyRotator>, provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            recommender: RecommendationDispatcher::new(rotator.clone(), provider.clone()),
            chat: ChatAssistant::new(rotator.clone(), provider),
            rotator,
        }
    }
}
