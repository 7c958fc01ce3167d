//! Shared application state for the server.

use std::time::Instant;

use crate::config::HydrosenseConfig;

/// Shared application state.
///
/// Read-only after startup. Each request builds its own graph and sensor
/// sets, so no locking is needed.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Loaded configuration (file values merged with CLI overrides)
    pub config: HydrosenseConfig,
    /// Server start time for uptime reporting
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: HydrosenseConfig) -> Self {
        Self {
            config,
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds.
    pub fn uptime_seconds(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }
}
