//! The `post` pass: submit every monitor definition in the working
//! directory and record the ids of the monitors that were created.

use anyhow::{Context, Result};
use pkg_client::{ApiResponse, MonitorApi};
use pkg_constants::paths::MONITOR_IDS_FILE;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::files::{list_monitor_files, write_pretty_json};

/// Result of submitting one definition file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Created {
        file: PathBuf,
        entity_id: String,
    },
    Failed {
        file: PathBuf,
        /// HTTP status, when the API answered.
        status: Option<u16>,
        detail: String,
    },
}

#[derive(Debug, Deserialize)]
struct CreatedMonitor {
    #[serde(rename = "entityId")]
    entity_id: String,
}

/// Outcomes of a whole upload run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReport {
    pub outcomes: Vec<UploadOutcome>,
    /// Where the created ids were written, if any monitor was created.
    pub ids_file: Option<PathBuf>,
}

impl UploadReport {
    /// Ids of the created monitors, in upload order.
    pub fn created_ids(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                UploadOutcome::Created { entity_id, .. } => Some(entity_id.clone()),
                UploadOutcome::Failed { .. } => None,
            })
            .collect()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, UploadOutcome::Failed { .. }))
            .count()
    }
}

/// Upload every `*monitor.json` file of `work_dir`, one attempt each.
///
/// Per-file failures are recorded and the run continues. The ids file is
/// written once, at the end, and only if at least one monitor was created.
pub fn upload_monitors<A: MonitorApi>(api: &A, work_dir: &Path) -> Result<UploadReport> {
    let files = list_monitor_files(work_dir)?;
    info!("Found {} monitor definition(s) in '{}'", files.len(), work_dir.display());

    let outcomes: Vec<UploadOutcome> = files.iter().map(|file| upload_one(api, file)).collect();
    let mut report = UploadReport {
        outcomes,
        ids_file: None,
    };

    let ids = report.created_ids();
    if !ids.is_empty() {
        let ids_path = work_dir.join(MONITOR_IDS_FILE);
        write_pretty_json(&ids_path, &ids).inspect_err(|_| {
            error!("Unable to save ids of the created monitors: {:?}", ids);
        })?;
        info!(
            "Saved ids of the created monitors to '{}'.",
            ids_path.display()
        );
        report.ids_file = Some(ids_path);
    }
    Ok(report)
}

fn upload_one<A: MonitorApi>(api: &A, file: &Path) -> UploadOutcome {
    let failed = |status: Option<u16>, detail: String| {
        warn!(
            "Failed to upload the NAM monitor '{}'! Status code: {}, response: {}",
            file.display(),
            status.map_or_else(|| "-".to_string(), |s| s.to_string()),
            detail
        );
        UploadOutcome::Failed {
            file: file.to_path_buf(),
            status,
            detail,
        }
    };

    let monitor = match read_definition(file) {
        Ok(v) => v,
        Err(e) => return failed(None, format!("{:#}", e)),
    };

    let ApiResponse { status, body } = match api.create_monitor(&monitor) {
        Ok(resp) if resp.is_created() => resp,
        Ok(resp) => return failed(Some(resp.status), resp.body),
        Err(e) => return failed(None, format!("{:#}", e)),
    };

    match serde_json::from_str::<CreatedMonitor>(&body) {
        Ok(created) => {
            info!(
                "Uploaded the NAM monitor: '{}' successfully! Response: {}.",
                file.display(),
                body
            );
            UploadOutcome::Created {
                file: file.to_path_buf(),
                entity_id: created.entity_id,
            }
        }
        Err(e) => failed(Some(status), format!("no entityId in response {}: {}", body, e)),
    }
}

fn read_definition(file: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read '{}'", file.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in '{}'", file.display()))
}
