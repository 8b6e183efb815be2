//! Server-specific error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// The pending-file list could not be fetched; the cycle never started.
    #[error("{0}")]
    CycleFailed(#[from] dxp_common::DxpError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            // The trigger contract: a cycle that never started answers 400
            // with the bare error message as the body.
            AppError::CycleFailed(ref e) => {
                tracing::error!(error = %e, "Download cycle failed");
                (StatusCode::BAD_REQUEST, e.to_string())
            },
            AppError::Config(ref message) => {
                tracing::error!("Configuration error: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message.clone())
            },
            AppError::Internal(ref message) => {
                tracing::error!("Internal error: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message.clone())
            },
        };
        (status, message).into_response()
    }
}
