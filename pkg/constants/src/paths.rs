//! Filesystem naming constants.

/// Suffix marking a file in the working directory as a monitor definition.
pub const MONITOR_FILE_SUFFIX: &str = "monitor.json";

/// Name of the file that receives the ids of the created monitors.
pub const MONITOR_IDS_FILE: &str = "nam_monitor_ids.json";

/// Default location of the optional tunables file.
pub const DEFAULT_CONFIG_FILE: &str = "nam-migrate.yaml";
