//! Coverage mapping from non-sensor nodes to their covering sensor.

use crate::types::{CoverageMapping, NearestMap, SensorSet};

/// Map every non-sensor node in `nearest` to its nearest neighbor.
///
/// Sensors cover themselves and are not keys. The target is not checked
/// against `sensors`; that guarantee belongs to the selector.
pub fn map_to_sensors(nearest: &NearestMap, sensors: &SensorSet) -> CoverageMapping {
    nearest
        .iter()
        .filter(|(node, _)| !sensors.contains(*node))
        .map(|(node, target)| (node.clone(), target.clone()))
        .collect()
}
