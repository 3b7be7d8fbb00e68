//! Recommendation Dispatcher — validates a request, makes exactly one provider
//! call with a rotated key, and maps everything into `RecommendationResult`.
//!
//! Flow: validate → dispense key → render prompt → provider.complete → result.
//! Validation failures never touch the rotator or the network.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::llm_client::{CompletionProvider, CompletionRequest, KeyRotator, LlmError};
use crate::recommendations::models::{RecommendationRequest, RecommendationResult};
use crate::recommendations::prompts::{recommendation_system, render_recommendation_prompt};

pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to get recommendations. Please try again.";

#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("no API key available")]
    MissingCredential,

    #[error("provider call failed: {0}")]
    Provider(#[from] LlmError),
}

impl RecommendationError {
    /// Text safe to show in the UI.
    fn user_message(&self) -> String {
        match self {
            RecommendationError::Validation(msg) => msg.clone(),
            RecommendationError::MissingCredential | RecommendationError::Provider(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

#[derive(Clone)]
pub struct RecommendationDispatcher {
    rotator: Arc<KeyRotator>,
    provider: Arc<dyn CompletionProvider>,
}

impl RecommendationDispatcher {
    pub fn new(rotator: Arc<KeyRotator>, provider: Arc<dyn CompletionProvider>) -> Self {
        Self { rotator, provider }
    }

    pub async fn get_recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> RecommendationResult {
        let request_id = Uuid::new_v4();

        match self.dispatch(request).await {
            Ok(text) => {
                info!(%request_id, chars = text.len(), "Recommendations generated");
                RecommendationResult::Success { text }
            }
            Err(e @ RecommendationError::Validation(_)) => {
                info!(%request_id, "Recommendation request rejected: {e}");
                RecommendationResult::Failure {
                    message: e.user_message(),
                }
            }
            Err(e) => {
                error!(%request_id, "Recommendation request failed: {e}");
                RecommendationResult::Failure {
                    message: e.user_message(),
                }
            }
        }
    }

    async fn dispatch(&self, request: &RecommendationRequest) -> Result<String, RecommendationError> {
        request.validate().map_err(RecommendationError::Validation)?;

        let api_key = self.rotator.next_key();
        if api_key.is_empty() {
            warn!("Recommendation requested but no API key is configured");
            return Err(RecommendationError::MissingCredential);
        }

        let completion = CompletionRequest::single(
            recommendation_system(),
            render_recommendation_prompt(&request.interests, &request.goals),
        );

        Ok(self.provider.complete(&api_key, &completion).await?)
    }
}
