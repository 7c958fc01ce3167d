//! End-to-end sensor allocation.
//!
//! Orchestrates:
//! 1. Collecting junctions above the elevation threshold
//! 2. Building the network graph from pipe records
//! 3. Resolving nearest neighbors
//! 4. Selecting sensors
//! 5. Mapping the remaining nodes to sensors
//!
//! Every structure is built fresh per call; nothing is cached between runs.

use serde::Serialize;
use std::collections::BTreeSet;
use std::time::Instant;
use tracing::info;

use crate::coverage::map_to_sensors;
use crate::error::Result;
use crate::graph::{LoaderOptions, NetworkGraph, NetworkSummary};
use crate::inp::Sections;
use crate::nearest::nearest_neighbors;
use crate::selector::select_sensors;
use crate::types::{CoverageMapping, NodeId, SensorSet};

/// Result of one allocation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Allocation {
    /// Selected sensor nodes.
    pub sensor_nodes: SensorSet,
    /// Non-sensor node -> covering sensor.
    pub mapping: CoverageMapping,
    /// Junctions dropped by the elevation filter.
    pub excluded_nodes: BTreeSet<NodeId>,
    /// Size of the filtered network.
    pub summary: NetworkSummary,
}

/// Run the full pipeline over parsed sections.
pub fn allocate(sections: &Sections, options: &LoaderOptions) -> Result<Allocation> {
    let start = Instant::now();

    let (graph, excluded) = NetworkGraph::from_sections(sections, options);

    let nearest = nearest_neighbors(&graph);
    let sensors = select_sensors(&graph, &nearest)?;
    let mapping = map_to_sensors(&nearest, &sensors);
    let summary = graph.summary();

    info!(
        "Allocated {} sensors covering {} nodes ({} nodes, {} excluded) in {:?}",
        sensors.len(),
        mapping.len(),
        summary.node_count,
        excluded.len(),
        start.elapsed()
    );

    Ok(Allocation {
        sensor_nodes: sensors,
        mapping,
        excluded_nodes: excluded,
        summary,
    })
}

/// Decode raw file contents and run the pipeline.
pub fn allocate_bytes(bytes: &[u8], options: &LoaderOptions) -> Result<Allocation> {
    allocate(&Sections::from_bytes(bytes), options)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NETWORK: &str = "\
[TITLE]
Star network

[JUNCTIONS]
;ID  Elev  Demand
 A   10    0
 B   20    5
 C   30    0
 D   40    0

[PIPES]
;ID  Node1  Node2  Length
 P1  A      B      100
 P2  B      C      100
 P3  B      D      100

[END]
";

    #[test]
    fn test_star_network() {
        let allocation = allocate(&Sections::parse(NETWORK), &LoaderOptions::default()).unwrap();

        assert_eq!(
            allocation.sensor_nodes.iter().collect::<Vec<_>>(),
            vec!["B"]
        );
        assert_eq!(allocation.mapping.len(), 3);
        assert_eq!(allocation.mapping["A"], "B");
        assert_eq!(allocation.mapping["C"], "B");
        assert_eq!(allocation.mapping["D"], "B");
        assert!(allocation.excluded_nodes.is_empty());
    }

    #[test]
    fn test_threshold_changes_network() {
        let options = LoaderOptions::with_threshold(15.0);
        let allocation = allocate(&Sections::parse(NETWORK), &options).unwrap();

        assert_eq!(allocation.excluded_nodes.len(), 3);
        assert!(allocation.sensor_nodes.is_empty());
        assert!(allocation.mapping.is_empty());
        assert_eq!(allocation.summary.node_count, 0);
    }

    #[test]
    fn test_empty_input() {
        let allocation = allocate(&Sections::parse(""), &LoaderOptions::default()).unwrap();

        assert!(allocation.sensor_nodes.is_empty());
        assert!(allocation.mapping.is_empty());
        assert_eq!(allocation.summary, NetworkSummary::default());
    }

    #[test]
    fn test_every_node_is_sensor_or_mapped() {
        let text = "[PIPES]\nP1 1 2\nP2 2 3\nP3 3 4\nP4 4 5\nP5 5 1\nP6 2 6\nP7 6 7\nP8 7 8\n";
        let allocation = allocate(&Sections::parse(text), &LoaderOptions::default()).unwrap();

        for node in ["1", "2", "3", "4", "5", "6", "7", "8"] {
            let is_sensor = allocation.sensor_nodes.contains(node);
            let is_mapped = allocation.mapping.contains_key(node);
            assert!(is_sensor ^ is_mapped, "node {node} must be exactly one of sensor or mapped");
        }
    }

    #[test]
    fn test_self_loop_pipe_makes_sensor() {
        let text = "[PIPES]\nP1 A A\nP2 A B\n";
        let allocation = allocate(&Sections::parse(text), &LoaderOptions::default()).unwrap();

        assert_eq!(
            allocation.sensor_nodes.iter().collect::<Vec<_>>(),
            vec!["A"]
        );
        assert_eq!(allocation.mapping.len(), 1);
        assert_eq!(allocation.mapping["B"], "A");
    }

    #[test]
    fn test_carriage_return_line_endings() {
        let text = "[PIPES]\rP1 A B\rP2 B C\rP3 B D\r";
        let allocation = allocate(&Sections::parse(text), &LoaderOptions::default()).unwrap();

        assert_eq!(
            allocation.sensor_nodes.iter().collect::<Vec<_>>(),
            vec!["B"]
        );
        assert_eq!(allocation.mapping.len(), 3);
        assert_eq!(allocation.mapping["A"], "B");
    }

    #[test]
    fn test_allocate_bytes_matches_text() {
        let from_bytes = allocate_bytes(NETWORK.as_bytes(), &LoaderOptions::default()).unwrap();
        let from_text = allocate(&Sections::parse(NETWORK), &LoaderOptions::default()).unwrap();
        assert_eq!(from_bytes, from_text);
    }

    #[test]
    fn test_serializes_wire_fields() {
        let allocation = allocate(&Sections::parse(NETWORK), &LoaderOptions::default()).unwrap();
        let json = serde_json::to_value(&allocation).unwrap();

        assert_eq!(json["sensor_nodes"], serde_json::json!(["B"]));
        assert_eq!(json["mapping"]["A"], "B");
    }
}
