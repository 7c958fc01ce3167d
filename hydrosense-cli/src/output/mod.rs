//! Output formatting module for the hydrosense CLI
//!
//! Provides unified output formatting across all commands with support for
//! three formats: table (human-readable), json (machine-readable) and text
//! (plain line-per-node listing).
//!
//! Automatically detects TTY context to adjust colors.

use clap::ValueEnum;
use serde::Serialize;
use std::io::IsTerminal;

mod json;
mod table;

pub use self::json::JsonOutput;
pub use self::table::TableOutput;

/// Output format for CLI results
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table format (default)
    #[default]
    Table,
    /// JSON format for machine consumption
    Json,
    /// Plain text, one line per covered node
    Text,
}

/// Configuration for output rendering
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// The output format to use
    pub format: OutputFormat,
    /// Single-line JSON (`--compact`)
    pub compact: bool,
}

impl OutputConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            compact: false,
        }
    }

    /// Create an OutputConfig with automatic TTY detection
    ///
    /// Colors are disabled when stdout is piped or redirected.
    pub fn auto_detect(format: OutputFormat, compact: bool) -> Self {
        if !std::io::stdout().is_terminal() {
            colored::control::set_override(false);
        }
        Self {
            compact,
            ..Self::new(format)
        }
    }
}

/// Trait for types that can be formatted as output
pub trait Outputter: Serialize + Sized {
    /// Render as table format
    fn to_table(&self, config: &OutputConfig) -> String;

    /// Render as JSON format
    fn to_json(&self, config: &OutputConfig) -> String {
        JsonOutput::format(self, config)
    }

    /// Render as plain text
    fn to_text(&self, config: &OutputConfig) -> String {
        self.to_table(config)
    }

    /// Render using the format specified in config
    fn render(&self, config: &OutputConfig) -> String {
        match config.format {
            OutputFormat::Table => self.to_table(config),
            OutputFormat::Json => self.to_json(config),
            OutputFormat::Text => self.to_text(config),
        }
    }

    /// Render and print to stdout
    fn output(&self, config: &OutputConfig) {
        println!("{}", self.render(config));
    }
}

/// Simple success message
#[derive(Debug, Serialize)]
pub struct SuccessMessage {
    pub message: String,
}

impl SuccessMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Outputter for SuccessMessage {
    fn to_table(&self, _config: &OutputConfig) -> String {
        use colored::Colorize;
        format!("{} {}", "SUCCESS:".green().bold(), self.message)
    }

    fn to_text(&self, _config: &OutputConfig) -> String {
        self.message.clone()
    }
}
