//! The `get` pass: pull endpoints from the inventory and write one monitor
//! definition file per convertible endpoint.

use pkg_client::EndpointInventory;
use pkg_converter::{MonitorTemplate, convert_endpoint};
use pkg_types::config::ConverterConfig;
use pkg_types::endpoint::{EndpointConfig, ExtensionInstance};
use pkg_types::kind::{ExtensionKind, MonitorKind};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::files::{monitor_file_name, write_pretty_json};

/// Why an endpoint is left out of the migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// NAM monitors cannot run through a proxy.
    Proxy,
    /// NAM has no UDP port checks.
    UdpProtocol,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Proxy => write!(f, "Proxy servers are not supported for NAM monitors"),
            SkipReason::UdpProtocol => {
                write!(f, "UDP protocol monitors are not supported in NAM")
            }
        }
    }
}

/// Result for one endpoint (or one extension, when its listing failed).
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractOutcome {
    Saved {
        kind: ExtensionKind,
        endpoint: String,
        path: PathBuf,
    },
    Skipped {
        kind: ExtensionKind,
        endpoint: String,
        reason: SkipReason,
    },
    Failed {
        kind: ExtensionKind,
        endpoint: String,
        error: String,
    },
    ListingFailed {
        kind: ExtensionKind,
        error: String,
    },
}

/// Everything one extraction run needs.
pub struct ExtractRequest<'a> {
    pub kinds: &'a [ExtensionKind],
    pub locations: &'a [String],
    pub work_dir: &'a Path,
    pub config: &'a ConverterConfig,
    pub template: &'a MonitorTemplate,
}

/// Counts per outcome, for the end-of-run notice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    pub saved: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl ExtractSummary {
    pub fn from_outcomes(outcomes: &[ExtractOutcome]) -> Self {
        outcomes.iter().fold(Self::default(), |mut acc, outcome| {
            match outcome {
                ExtractOutcome::Saved { .. } => acc.saved += 1,
                ExtractOutcome::Skipped { .. } => acc.skipped += 1,
                ExtractOutcome::Failed { .. } | ExtractOutcome::ListingFailed { .. } => {
                    acc.failed += 1
                }
            }
            acc
        })
    }
}

/// Whether the endpoint must be left out, and why.
pub fn skip_reason(kind: MonitorKind, endpoint: &EndpointConfig) -> Option<SkipReason> {
    if endpoint.uses_proxy() {
        return Some(SkipReason::Proxy);
    }
    if kind == MonitorKind::Tcp && endpoint.uses_udp() {
        return Some(SkipReason::UdpProtocol);
    }
    None
}

/// Run the extraction for every requested extension, in order.
/// Failures are recorded per endpoint and never stop the run.
pub fn extract_monitors<I: EndpointInventory>(
    inventory: &I,
    request: &ExtractRequest<'_>,
) -> Vec<ExtractOutcome> {
    let mut outcomes = Vec::new();
    for &kind in request.kinds {
        let instances = match inventory.list_instances(kind.extension_id()) {
            Ok(instances) => instances,
            Err(e) => {
                warn!("Unable to list endpoints of the '{}' extension: {:#}", kind, e);
                outcomes.push(ExtractOutcome::ListingFailed {
                    kind,
                    error: format!("{:#}", e),
                });
                continue;
            }
        };
        info!("Found {} '{}' endpoint(s)", instances.len(), kind);

        for instance in &instances {
            outcomes.push(extract_one(inventory, request, kind, instance));
        }
    }
    outcomes
}

fn extract_one<I: EndpointInventory>(
    inventory: &I,
    request: &ExtractRequest<'_>,
    kind: ExtensionKind,
    instance: &ExtensionInstance,
) -> ExtractOutcome {
    let endpoint_name = instance.name.clone();

    let endpoint = match inventory.full_configuration(kind.extension_id(), &instance.id) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(
                "Unable to fetch the configuration of the endpoint '{}': {:#}",
                endpoint_name, e
            );
            return ExtractOutcome::Failed {
                kind,
                endpoint: endpoint_name,
                error: format!("{:#}", e),
            };
        }
    };

    let monitor_kind = kind.monitor_kind();
    if let Some(reason) = skip_reason(monitor_kind, &endpoint) {
        info!(
            "{}. Aborting migration of the endpoint '{}'.",
            reason, endpoint_name
        );
        return ExtractOutcome::Skipped {
            kind,
            endpoint: endpoint_name,
            reason,
        };
    }

    let monitor = convert_endpoint(
        monitor_kind,
        &endpoint,
        request.locations,
        request.config,
        request.template,
    );
    let path = request
        .work_dir
        .join(monitor_file_name(&endpoint_name, kind));

    match write_pretty_json(&path, &monitor) {
        Ok(()) => {
            info!("Saved monitor config to the file: '{}'.", path.display());
            ExtractOutcome::Saved {
                kind,
                endpoint: endpoint_name,
                path,
            }
        }
        Err(e) => {
            warn!("Unable to save JSON to the file: '{}', {:#}.", path.display(), e);
            ExtractOutcome::Failed {
                kind,
                endpoint: endpoint_name,
                error: format!("{:#}", e),
            }
        }
    }
}
