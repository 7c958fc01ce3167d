//! Nearest-neighbor resolution.

use crate::graph::NetworkGraph;
use crate::types::NearestMap;

/// Pick one nearest neighbor per node.
///
/// The minimum-weight edge wins; among equal weights the first entry in the
/// adjacency list is kept, so the result follows pipe record order. Nodes
/// with an empty adjacency list are left out.
pub fn nearest_neighbors(graph: &NetworkGraph) -> NearestMap {
    graph
        .iter()
        .filter_map(|(node, edges)| {
            let closest = edges
                .iter()
                .reduce(|best, edge| if edge.weight < best.weight { edge } else { best })?;
            Some((node.clone(), closest.neighbor.clone()))
        })
        .collect()
}
