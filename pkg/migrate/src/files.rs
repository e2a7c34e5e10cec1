//! Working-directory helpers shared by both passes.

use anyhow::{Context, Result};
use pkg_constants::paths::MONITOR_FILE_SUFFIX;
use pkg_types::kind::ExtensionKind;
use pkg_types::validate::sanitize_file_component;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

/// Make sure the working directory exists, creating it if needed.
pub fn ensure_work_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    info!("Directory '{}' does not exist, creating...", dir.display());
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Unable to create directory '{}'. Aborting.", dir.display()))
}

/// Unique name of a monitor definition file:
/// `{random hex}-{sanitized endpoint name}-{extension}-monitor.json`.
pub fn monitor_file_name(endpoint_name: &str, kind: ExtensionKind) -> String {
    format!(
        "{}-{}-{}-{}",
        Uuid::new_v4().simple(),
        sanitize_file_component(endpoint_name),
        kind,
        MONITOR_FILE_SUFFIX
    )
}

/// Regular files in `dir` whose name marks them as monitor definitions, sorted by name.
pub fn list_monitor_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory '{}'", dir.display()))?;

    Ok(collect_definitions(entries.map(|e| e.map(|e| e.path()))))
}

/// Keep the definition files among directory entries. Entries that cannot be
/// read are logged and skipped.
fn collect_definitions<I>(entries: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = std::io::Result<PathBuf>>,
{
    let mut files = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!("Skipping unreadable directory entry: {}", e);
                continue;
            }
        };
        let is_definition = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(MONITOR_FILE_SUFFIX));
        if is_definition && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    files
}

/// Write `value` as JSON indented with four spaces, replacing any existing file.
pub fn write_pretty_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    std::fs::write(path, buf).with_context(|| format!("Failed to write '{}'", path.display()))
}
