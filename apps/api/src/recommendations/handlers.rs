//! Axum route handlers for the Recommendations API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::AppError;
use crate::recommendations::models::{RecommendationRequest, RecommendationResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    #[serde(flatten)]
    pub result: RecommendationResult,
    pub generated_at: DateTime<Utc>,
}

/// POST /api/v1/recommendations
///
/// Always 200 for a well-formed body: success and failure are both carried in
/// the tagged `status` field.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let Json(request) = payload?;

    let result = state.recommender.get_recommendations(&request).await;

    Ok(Json(RecommendationResponse {
        result,
        generated_at: Utc::now(),
    }))
}
