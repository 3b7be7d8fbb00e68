pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::chat::handlers::handle_chat;
use crate::errors::AppError;
use crate::recommendations::handlers::handle_recommendations;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/recommendations", post(handle_recommendations))
        .route("/api/v1/chat", post(handle_chat))
        .fallback(not_found)
        .with_state(state)
}
