//! Hydrosense Core - Sensor placement for hydraulic network models.
//!
//! This crate reads EPANET-style `.inp` network descriptions and picks a small
//! set of junctions to instrument so that every other junction sits next to a
//! sensor. The selection is a nearest-neighbor heuristic, not an exact
//! dominating-set solver.
//!
//! # Pipeline
//!
//! ```text
//! Sections -> NetworkGraph -> NearestMap -> SensorSet -> CoverageMapping
//! ```
//!
//! - **Loader** ([`graph`]): undirected adjacency, junctions above the
//!   elevation threshold removed with all their pipes
//! - **Resolver** ([`nearest`]): one nearest neighbor per node
//! - **Selector** ([`selector`]): initial sensors, gap fill, redundancy removal
//! - **Mapper** ([`coverage`]): non-sensor node to covering sensor
//!
//! # Usage
//!
//! ```
//! use hydrosense_core::{allocate, LoaderOptions, Sections};
//!
//! let sections = Sections::parse("[PIPES]\nP1 A B\nP2 B C\nP3 B D\n");
//! let allocation = allocate(&sections, &LoaderOptions::default()).unwrap();
//!
//! assert!(allocation.sensor_nodes.contains("B"));
//! assert_eq!(allocation.mapping["A"], "B");
//! ```

pub mod coverage;
pub mod error;
pub mod graph;
pub mod inp;
pub mod nearest;
pub mod pipeline;
pub mod selector;
pub mod types;

pub use error::{AllocationError, Result};
pub use graph::{LoaderOptions, NetworkGraph, NetworkSummary, DEFAULT_ELEVATION_THRESHOLD};
pub use inp::Sections;
pub use pipeline::{allocate, allocate_bytes, Allocation};
pub use types::*;

/// Get the version of hydrosense-core.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
