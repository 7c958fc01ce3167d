//! Submit command - Run allocation on a remote hydrosense daemon
//!
//! Uploads the network file as multipart form data to
//! `POST {url}/sensor-allocation` and renders the response like `allocate`.

use super::allocate::AllocationReport;
use crate::output::{OutputConfig, Outputter};
use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use std::path::Path;

/// Default daemon address
pub const DEFAULT_URL: &str = "http://localhost:8080";

/// Build the allocation endpoint URL.
fn endpoint(base: &str, threshold: Option<f64>) -> String {
    let base = base.trim_end_matches('/');
    match threshold {
        Some(t) => format!("{}/sensor-allocation?threshold={}", base, t),
        None => format!("{}/sensor-allocation", base),
    }
}

/// Run the submit command.
pub async fn run(
    path: &str,
    url: &str,
    threshold: Option<f64>,
    output: &OutputConfig,
) -> Result<()> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path))?;
    let filename = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string());

    let form = Form::new().part("file", Part::bytes(bytes).file_name(filename));
    let target = endpoint(url, threshold);
    tracing::debug!("Submitting {} to {}", path, target);

    let response = reqwest::Client::new()
        .post(&target)
        .multipart(form)
        .send()
        .await
        .with_context(|| format!("Failed to reach daemon at {}", url))?;

    let status = response.status();
    let body: serde_json::Value = response
        .json()
        .await
        .context("Daemon returned a non-JSON response")?;

    if !status.is_success() {
        let message = body
            .get("error")
            .and_then(|e| e.as_str())
            .unwrap_or("unknown error");
        anyhow::bail!("Daemon rejected request ({}): {}", status, message);
    }

    let mut report: AllocationReport =
        serde_json::from_value(body).context("Unexpected response shape from daemon")?;
    report.source = path.to_string();
    report.output(output);
    Ok(())
}
