//! Network graph construction from parsed `.inp` sections.
//!
//! The graph is an undirected adjacency map: every surviving pipe appears in
//! both endpoints' lists, in record order. Junctions above the elevation
//! threshold are removed together with every pipe that touches them, so a
//! node is a key only while it has at least one surviving edge.
//!
//! # Architecture
//!
//! ```text
//! Sections ([JUNCTIONS], [PIPES]) -> excluded_nodes -> NetworkGraph
//! ```
//!
//! Summary statistics (connected components) go through petgraph.

use petgraph::algo::kosaraju_scc;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

use crate::inp::Sections;
use crate::types::{Edge, NodeId};

/// Default cutoff above which junctions are dropped from the network.
pub const DEFAULT_ELEVATION_THRESHOLD: f64 = 100.0;

/// Weight given to every pipe. Pipe attributes are not used for weighting.
pub const UNIFORM_WEIGHT: f64 = 1.0;

pub const JUNCTIONS_SECTION: &str = "JUNCTIONS";
pub const PIPES_SECTION: &str = "PIPES";

/// Settings for turning sections into a graph.
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderOptions {
    /// Junctions with elevation strictly greater than this are excluded.
    pub elevation_threshold: f64,
    /// Section holding `(id, elevation, ...)` records.
    pub junction_section: String,
    /// Section holding `(id, node1, node2, ...)` records.
    pub pipe_section: String,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            elevation_threshold: DEFAULT_ELEVATION_THRESHOLD,
            junction_section: JUNCTIONS_SECTION.to_string(),
            pipe_section: PIPES_SECTION.to_string(),
        }
    }
}

impl LoaderOptions {
    pub fn with_threshold(elevation_threshold: f64) -> Self {
        Self {
            elevation_threshold,
            ..Self::default()
        }
    }
}

/// Collect junctions whose elevation exceeds `threshold`.
///
/// Records with fewer than two fields, or whose elevation does not parse as a
/// float, are skipped and never excluded.
pub fn excluded_nodes(records: &[String], threshold: f64) -> BTreeSet<NodeId> {
    let mut skip = BTreeSet::new();

    for line in records {
        let mut fields = line.split_whitespace();
        let (Some(id), Some(elevation)) = (fields.next(), fields.next()) else {
            continue;
        };

        match parse_elevation(elevation) {
            Some(value) if value > threshold => {
                skip.insert(id.to_string());
            }
            Some(_) => {}
            None => debug!("Skipping junction {} with unparsable elevation {:?}", id, elevation),
        }
    }

    skip
}

/// Parse an elevation field, accepting `_` digit separators (`1_000.5`).
///
/// A separator must sit between two digits; anything else is rejected.
fn parse_elevation(field: &str) -> Option<f64> {
    if !field.contains('_') {
        return field.parse().ok();
    }

    let bytes = field.as_bytes();
    let separators_ok = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_'
            || (i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
    });
    if !separators_ok {
        return None;
    }

    field.replace('_', "").parse().ok()
}

/// Undirected adjacency map of the hydraulic network.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkGraph {
    adjacency: BTreeMap<NodeId, Vec<Edge>>,
}

impl NetworkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from parsed sections.
    ///
    /// Returns the graph together with the junctions the elevation filter
    /// removed.
    pub fn from_sections(sections: &Sections, options: &LoaderOptions) -> (Self, BTreeSet<NodeId>) {
        let skip = excluded_nodes(
            sections.get(&options.junction_section),
            options.elevation_threshold,
        );
        let graph = Self::from_pipes(sections.get(&options.pipe_section), &skip);
        (graph, skip)
    }

    /// Build the graph from pipe records, dropping any pipe with an endpoint in `skip`.
    pub fn from_pipes(records: &[String], skip: &BTreeSet<NodeId>) -> Self {
        let mut graph = Self::new();

        for line in records {
            let mut fields = line.split_whitespace();
            let (Some(_pipe), Some(a), Some(b)) = (fields.next(), fields.next(), fields.next())
            else {
                debug!("Skipping short pipe record {:?}", line);
                continue;
            };

            if skip.contains(a) || skip.contains(b) {
                continue;
            }

            graph.add_edge(a, b, UNIFORM_WEIGHT);
        }

        graph
    }

    /// Register a node without edges. No-op if it already exists.
    pub fn add_node(&mut self, id: &str) {
        self.adjacency.entry(id.to_string()).or_default();
    }

    /// Add an undirected edge. Both endpoints get an adjacency entry.
    ///
    /// A self-loop (`a == b`) lands twice in the node's own list.
    pub fn add_edge(&mut self, a: &str, b: &str, weight: f64) {
        self.adjacency
            .entry(a.to_string())
            .or_default()
            .push(Edge::new(b, weight));
        self.adjacency
            .entry(b.to_string())
            .or_default()
            .push(Edge::new(a, weight));
    }

    /// Adjacency list of `node`, in insertion order.
    pub fn neighbors(&self, node: &str) -> Option<&[Edge]> {
        self.adjacency.get(node).map(Vec::as_slice)
    }

    pub fn contains(&self, node: &str) -> bool {
        self.adjacency.contains_key(node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &Vec<Edge>)> {
        self.adjacency.iter()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges (parallel pipes count separately).
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Size and connectivity statistics.
    pub fn summary(&self) -> NetworkSummary {
        let mut graph: UnGraph<&str, f64> = UnGraph::new_undirected();
        let mut index: HashMap<&str, NodeIndex> = HashMap::with_capacity(self.node_count());

        for node in self.nodes() {
            index.insert(node, graph.add_node(node));
        }

        // Each undirected edge is stored twice; keep one copy. Self-loops
        // cannot change connectivity.
        for (node, edges) in &self.adjacency {
            for edge in edges {
                if node.as_str() < edge.neighbor.as_str() {
                    if let (Some(&a), Some(&b)) =
                        (index.get(node.as_str()), index.get(edge.neighbor.as_str()))
                    {
                        graph.add_edge(a, b, edge.weight);
                    }
                }
            }
        }

        let components = kosaraju_scc(&graph);

        NetworkSummary {
            node_count: graph.node_count(),
            edge_count: self.edge_count(),
            component_count: components.len(),
            largest_component: components.iter().map(Vec::len).max().unwrap_or(0),
        }
    }
}

/// Size and connectivity of a [`NetworkGraph`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub node_count: usize,
    pub edge_count: usize,
    pub component_count: usize,
    pub largest_component: usize,
}
