//! Sensor selection heuristic.
//!
//! Three passes over the nearest-neighbor map:
//!
//! 1. **Initial sensors**: nodes chosen as nearest neighbor by more than one node.
//! 2. **Gap fill**: a node whose nearest neighbor is not an initial sensor
//!    becomes a sensor itself.
//! 3. **Redundancy removal**: a sensor whose every graph neighbor is also a
//!    sensor is dropped.
//!
//! Each pass returns a new set; nothing is mutated in place.

use std::collections::HashMap;

use crate::error::{AllocationError, Result};
use crate::graph::NetworkGraph;
use crate::types::{NearestMap, SensorSet};

/// Nodes named as nearest neighbor by more than one other node.
pub fn initial_sensors(nearest: &NearestMap) -> SensorSet {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for target in nearest.values() {
        *counts.entry(target.as_str()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .map(|(node, _)| node.to_string())
        .collect()
}

/// Nodes whose nearest neighbor is not in `sensors`.
pub fn left_out_nodes(nearest: &NearestMap, sensors: &SensorSet) -> SensorSet {
    nearest
        .iter()
        .filter(|(_, target)| !sensors.contains(*target))
        .map(|(node, _)| node.clone())
        .collect()
}

/// Drop sensors that have no non-sensor neighbor.
///
/// Membership is judged against `sensors` as given, in a single pass. A
/// sensor with an empty adjacency list is vacuously redundant. Applying this
/// twice yields the same set as applying it once.
///
/// # Errors
///
/// [`AllocationError::UnknownNode`] if a sensor has no entry in `graph`.
pub fn remove_redundant(graph: &NetworkGraph, sensors: &SensorSet) -> Result<SensorSet> {
    let mut kept = SensorSet::new();

    for sensor in sensors {
        let edges = graph
            .neighbors(sensor)
            .ok_or_else(|| AllocationError::UnknownNode {
                node: sensor.clone(),
            })?;

        if edges.iter().any(|edge| !sensors.contains(&edge.neighbor)) {
            kept.insert(sensor.clone());
        }
    }

    Ok(kept)
}

/// Run all three passes.
pub fn select_sensors(graph: &NetworkGraph, nearest: &NearestMap) -> Result<SensorSet> {
    let initial = initial_sensors(nearest);
    let left_out = left_out_nodes(nearest, &initial);
    let candidates: SensorSet = initial.union(&left_out).cloned().collect();

    remove_redundant(graph, &candidates)
}
