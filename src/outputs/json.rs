//! JSON export of the processed dataset and prediction.
//!
//! ```text
//! json_output_dir/
//! └── mvp_2022.json
//! ```

use crate::models::Report;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Write `report` to `{json_output_dir}/mvp_{target_year}.json`.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir.display()))]
pub async fn write_report(report: &Report<'_>, json_output_dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(report)?;

    if let Err(e) = fs::create_dir_all(json_output_dir).await {
        error!(error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = json_output_dir.join(format!("mvp_{}.json", report.target_year));
    info!(path = %path.display(), "Writing JSON");
    fs::write(&path, json).await?;
    info!(path = %path.display(), seasons = report.dataset.seasons.len(), "Wrote JSON report");
    Ok(path)
}
