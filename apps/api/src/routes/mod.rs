pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::contract::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Contract API
        .route("/api/v1/contracts/fields", get(handlers::handle_fields))
        .route("/api/v1/contracts/preview", post(handlers::handle_preview))
        .route("/api/v1/contracts/pdf", post(handlers::handle_generate_pdf))
        // Path used by the original form
        .route("/api/generate-contract", post(handlers::handle_generate_pdf))
        .with_state(state)
}
