//! The NAM monitor template every conversion starts from.

use anyhow::{Context, Result, bail};
use pkg_types::monitor::NamMonitor;
use std::path::Path;
use tracing::debug;

const BUILTIN_TEMPLATE: &str = include_str!("../templates/nam_monitor_template.json");

/// A monitor configuration with at least one step carrying at least one
/// request configuration. The mapper fills in the first of each.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorTemplate {
    monitor: NamMonitor,
}

impl MonitorTemplate {
    /// The template compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_TEMPLATE).context("built-in monitor template is invalid")
    }

    /// Load a replacement template from disk.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading monitor template from {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read template {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid template {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let monitor: NamMonitor = serde_json::from_str(content)?;
        match monitor.steps.first() {
            None => bail!("template has no steps"),
            Some(step) if step.request_configurations.is_empty() => {
                bail!("template step has no request configurations")
            }
            Some(_) => Ok(Self { monitor }),
        }
    }

    /// A fresh copy of the template to fill in.
    pub fn instantiate(&self) -> NamMonitor {
        self.monitor.clone()
    }
}
