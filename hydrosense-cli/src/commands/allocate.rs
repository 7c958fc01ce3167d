//! Allocate command - Select sensor nodes for a network file
//!
//! Runs the full pipeline locally: reads the `.inp` file, filters junctions by
//! elevation, selects sensors and maps every other node to its sensor.

use crate::output::{OutputConfig, Outputter, TableOutput};
use anyhow::{Context, Result};
use colored::Colorize;
use hydrosense_core::{allocate_bytes, Allocation, NetworkSummary, NodeId};
use hydrosense_daemon::HydrosenseConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sensor allocation result for display.
///
/// Also the shape `submit` decodes from the daemon, so everything beyond the
/// sensors and mapping is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationReport {
    /// File the network was read from
    #[serde(default)]
    pub source: String,
    /// Selected sensor nodes
    pub sensor_nodes: Vec<NodeId>,
    /// Non-sensor node -> covering sensor
    pub mapping: BTreeMap<NodeId, NodeId>,
    /// Junctions dropped by the elevation filter
    #[serde(default)]
    pub excluded_nodes: Vec<NodeId>,
    /// Size of the filtered network
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<NetworkSummary>,
}

impl AllocationReport {
    pub fn new(source: impl Into<String>, allocation: Allocation) -> Self {
        Self {
            source: source.into(),
            sensor_nodes: allocation.sensor_nodes.into_iter().collect(),
            mapping: allocation.mapping,
            excluded_nodes: allocation.excluded_nodes.into_iter().collect(),
            summary: Some(allocation.summary),
        }
    }
}

impl Outputter for AllocationReport {
    fn to_table(&self, _config: &OutputConfig) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} {}\n",
            "Sensor allocation for".bold(),
            self.source.cyan()
        ));
        output.push_str(&format!("{}\n", "-".repeat(60)));

        if let Some(summary) = &self.summary {
            output.push_str(&format!(
                "  {} nodes, {} pipes, {} components\n",
                summary.node_count, summary.edge_count, summary.component_count
            ));
        }
        if !self.excluded_nodes.is_empty() {
            output.push_str(&format!(
                "  {} {}\n",
                "Excluded by elevation:".dimmed(),
                self.excluded_nodes.join(", ")
            ));
        }

        output.push_str(&format!(
            "\n{} ({}): {}\n\n",
            "Sensor nodes".bold(),
            self.sensor_nodes.len(),
            self.sensor_nodes.join(" ").green()
        ));

        output.push_str(&TableOutput::format_rows(
            &["Node", "Covered by"],
            self.mapping
                .iter()
                .map(|(node, sensor)| vec![node.clone(), sensor.clone()]),
        ));
        output.push('\n');
        output
    }

    fn to_text(&self, _config: &OutputConfig) -> String {
        let mut output = String::from("Sensor Nodes:\n");
        output.push_str(&self.sensor_nodes.join(" "));
        output.push_str("\nMapping of Non-Sensor Nodes to Sensor Nodes:");
        for (node, sensor) in &self.mapping {
            output.push_str(&format!("\nNode {} is covered by Sensor Node {}", node, sensor));
        }
        output
    }
}

/// Run the allocate command.
pub fn run(
    path: &str,
    threshold: Option<f64>,
    config: &HydrosenseConfig,
    output: &OutputConfig,
) -> Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path))?;
    let options = config.network.loader_options(threshold);
    tracing::debug!("Allocating {} with threshold {}", path, options.elevation_threshold);

    let allocation = allocate_bytes(&bytes, &options)?;
    AllocationReport::new(path, allocation).output(output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use hydrosense_core::{allocate, LoaderOptions, Sections};

    fn star_report() -> AllocationReport {
        let sections = Sections::parse("[PIPES]\nP1 A B\nP2 B C\nP3 B D\n");
        let allocation = allocate(&sections, &LoaderOptions::default()).unwrap();
        AllocationReport::new("star.inp", allocation)
    }

    #[test]
    fn test_text_output() {
        let text = star_report().to_text(&OutputConfig::new(OutputFormat::Text));

        assert_eq!(
            text,
            "Sensor Nodes:\nB\nMapping of Non-Sensor Nodes to Sensor Nodes:\n\
             Node A is covered by Sensor Node B\n\
             Node C is covered by Sensor Node B\n\
             Node D is covered by Sensor Node B"
        );
    }

    #[test]
    fn test_decodes_daemon_response() {
        let report: AllocationReport = serde_json::from_value(serde_json::json!({
            "sensor_nodes": ["B"],
            "mapping": {"A": "B"},
            "excluded_nodes": [],
            "run_id": "5b1b7a4e-0000-4000-8000-000000000000",
        }))
        .unwrap();

        assert_eq!(report.sensor_nodes, vec!["B"]);
        assert!(report.summary.is_none());
    }
}
