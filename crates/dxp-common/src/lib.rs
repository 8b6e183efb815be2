//! DXP Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, utilities, and error handling for the DXP workspace.
//!
//! # Overview
//!
//! This crate provides common functionality used across all DXP workspace
//! members:
//!
//! - **Error Handling**: Custom error types and result types
//! - **Logging**: Tracing subscriber initialization
//! - **Types**: Shared domain types (`PendingFile`, `DownloadOutcome`)

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{DxpError, Result};
pub use types::{DownloadOutcome, PendingFile};
