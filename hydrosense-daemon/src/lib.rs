//! Hydrosense daemon library - HTTP surface for sensor allocation.
//!
//! This library provides:
//! - Configuration loading (`hydrosense.toml`)
//! - Axum router for the upload endpoints
//! - Temporary-file lifecycle for uploaded network files

pub mod config;
pub mod error;
pub mod server;
pub mod upload;

pub use config::HydrosenseConfig;
pub use error::ApiError;
pub use server::{create_router, AppState};
