//! Error types for hydrosense-core.

use thiserror::Error;

/// Result type alias for allocation operations.
pub type Result<T> = std::result::Result<T, AllocationError>;

/// Errors that can occur while selecting sensors.
///
/// Malformed input records never surface here; they are skipped by the
/// loader. These variants signal broken internal invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    /// A sensor candidate has no adjacency entry in the network graph.
    #[error("Node not found in network graph: {node}")]
    UnknownNode {
        /// Identifier that failed the lookup.
        node: String,
    },
}
