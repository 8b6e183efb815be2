//! Cycle trigger routes
//!
//! One operational route: `POST /check-downloads`. An external scheduler
//! hits it periodically; the body carries nothing. On success the response
//! is the full per-file outcome list; if the pending list itself cannot be
//! fetched the response is 400 with the error message as the body.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use dxp_sync::Orchestrator;
use std::sync::Arc;

use crate::error::AppError;

/// Shared state for the trigger routes
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

/// Create the trigger router
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/check-downloads", post(check_downloads))
        .with_state(state)
}

/// Run one orchestration cycle
///
/// POST /check-downloads
async fn check_downloads(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let outcomes = state.orchestrator.run().await?;
    Ok((StatusCode::OK, Json(outcomes)))
}
