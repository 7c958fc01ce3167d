//! HTTP server for the hydrosense daemon.
//!
//! Provides REST API for:
//! - Health checks
//! - Sensor allocation on an uploaded network file
//! - Network summaries

mod http;
pub mod state;

pub use http::create_router;
pub use state::AppState;
