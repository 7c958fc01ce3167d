//! Init command - Write a default `hydrosense.toml`

use crate::output::{OutputConfig, Outputter, SuccessMessage};
use anyhow::{Context, Result};
use hydrosense_daemon::HydrosenseConfig;
use std::path::Path;

/// Run the init command.
pub fn run(path: &Path, force: bool, output: &OutputConfig) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    std::fs::write(path, HydrosenseConfig::default().to_toml_string())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    SuccessMessage::new(format!("Wrote {}", path.display())).output(output);
    Ok(())
}
