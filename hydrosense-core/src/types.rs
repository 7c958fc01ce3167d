//! Shared data models for the allocation pipeline.
//!
//! Node identifiers are the raw tokens found in the network file. Ordered
//! collections are used throughout so results are reproducible run to run.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Identifier of a junction (or any other node) in the network file.
pub type NodeId = String;

/// Chosen nearest neighbor for every node that has at least one edge.
pub type NearestMap = BTreeMap<NodeId, NodeId>;

/// Selected sensor nodes.
pub type SensorSet = BTreeSet<NodeId>;

/// Non-sensor node -> sensor that covers it.
pub type CoverageMapping = BTreeMap<NodeId, NodeId>;

/// One adjacency entry: the node on the other end of a pipe and its weight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub neighbor: NodeId,
    pub weight: f64,
}

impl Edge {
    pub fn new(neighbor: impl Into<NodeId>, weight: f64) -> Self {
        Self {
            neighbor: neighbor.into(),
            weight,
        }
    }
}
