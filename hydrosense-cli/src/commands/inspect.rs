//! Inspect command - Summarize a network file without selecting sensors
//!
//! Shows which sections were found, which junctions the elevation filter drops
//! and how the remaining network is connected.

use crate::output::{OutputConfig, Outputter, TableOutput};
use anyhow::{Context, Result};
use colored::Colorize;
use hydrosense_core::{LoaderOptions, NetworkGraph, NetworkSummary, NodeId, Sections};
use hydrosense_daemon::HydrosenseConfig;
use serde::Serialize;

/// Network overview for display.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkReport {
    pub source: String,
    pub elevation_threshold: f64,
    /// Section names found in the file
    pub sections: Vec<String>,
    pub junction_records: usize,
    pub pipe_records: usize,
    #[serde(flatten)]
    pub summary: NetworkSummary,
    pub excluded_nodes: Vec<NodeId>,
}

impl NetworkReport {
    pub fn build(source: impl Into<String>, sections: &Sections, options: &LoaderOptions) -> Self {
        let (graph, excluded) = NetworkGraph::from_sections(sections, options);

        Self {
            source: source.into(),
            elevation_threshold: options.elevation_threshold,
            sections: sections.names().map(str::to_string).collect(),
            junction_records: sections.get(&options.junction_section).len(),
            pipe_records: sections.get(&options.pipe_section).len(),
            summary: graph.summary(),
            excluded_nodes: excluded.into_iter().collect(),
        }
    }
}

impl Outputter for NetworkReport {
    fn to_table(&self, _config: &OutputConfig) -> String {
        let mut output = format!("{} {}\n", "Network".bold(), self.source.cyan());
        output.push_str(&format!("{}\n", "-".repeat(60)));

        let rows = vec![
            vec!["Sections".to_string(), self.sections.join(", ")],
            vec!["Junction records".to_string(), self.junction_records.to_string()],
            vec!["Pipe records".to_string(), self.pipe_records.to_string()],
            vec![
                "Elevation threshold".to_string(),
                self.elevation_threshold.to_string(),
            ],
            vec!["Excluded junctions".to_string(), self.excluded_nodes.len().to_string()],
            vec!["Nodes".to_string(), self.summary.node_count.to_string()],
            vec!["Pipes".to_string(), self.summary.edge_count.to_string()],
            vec!["Components".to_string(), self.summary.component_count.to_string()],
            vec![
                "Largest component".to_string(),
                self.summary.largest_component.to_string(),
            ],
        ];
        output.push_str(&TableOutput::format_rows(&["Property", "Value"], rows));

        if !self.excluded_nodes.is_empty() {
            output.push_str(&format!(
                "\n{} {}",
                "Excluded:".dimmed(),
                self.excluded_nodes.join(", ")
            ));
        }
        output
    }
}

/// Run the inspect command.
pub fn run(
    path: &str,
    threshold: Option<f64>,
    config: &HydrosenseConfig,
    output: &OutputConfig,
) -> Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path))?;
    let sections = Sections::from_bytes(&bytes);
    let options = config.network.loader_options(threshold);

    NetworkReport::build(path, &sections, &options).output(output);
    Ok(())
}
