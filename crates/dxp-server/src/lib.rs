//! DXP Server Library
//!
//! HTTP surface for the download-orchestration service.
//!
//! # Overview
//!
//! The server exposes one operational endpoint: the cycle trigger. An
//! external scheduler POSTs to `/check-downloads`; the server runs a full
//! orchestration cycle and answers with the per-file outcomes. Everything
//! stateful lives behind the collaborator traits from `dxp-sync`.
//!
//! ## Framework Stack
//!
//! - **Axum**: web framework for the trigger route
//! - **SQLx**: pending-file list queries against Postgres
//! - **Tower**: middleware (request tracing)

pub mod config;
pub mod db;
pub mod error;
pub mod routes;
