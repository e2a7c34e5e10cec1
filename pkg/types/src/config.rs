use pkg_constants::converter::{
    DEFAULT_FREQUENCY_MIN, DNS_RECORD_TYPE, ICMP_NUMBER_OF_PACKETS, ICMP_PACKET_SIZE,
    ICMP_SUCCESS_RATE_PERCENT, ICMP_TIMEOUT_FOR_REPLY, TCP_DEFAULT_EXECUTION_TIMEOUT,
};
use serde::{Deserialize, Serialize};

/// Converter tunables file (YAML). Every field is optional.
///
/// Example `nam-migrate.yaml`:
/// ```yaml
/// default-frequency-min: 5
/// tcp-default-execution-timeout: 3
/// icmp-number-of-packets: 4
/// icmp-packet-size: 64
/// icmp-success-rate-percent: 75
/// icmp-timeout-for-reply: 2
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConverterConfigFile {
    #[serde(default, alias = "default-frequency-min")]
    pub default_frequency_min: Option<u32>,
    #[serde(default, alias = "dns-record-type")]
    pub dns_record_type: Option<String>,
    #[serde(default, alias = "tcp-default-execution-timeout")]
    pub tcp_default_execution_timeout: Option<u32>,
    #[serde(default, alias = "icmp-number-of-packets")]
    pub icmp_number_of_packets: Option<u32>,
    #[serde(default, alias = "icmp-packet-size")]
    pub icmp_packet_size: Option<u32>,
    #[serde(default, alias = "icmp-success-rate-percent")]
    pub icmp_success_rate_percent: Option<u32>,
    #[serde(default, alias = "icmp-timeout-for-reply")]
    pub icmp_timeout_for_reply: Option<u32>,
}

/// Load a YAML config file, returning the default if the file doesn't exist.
pub fn load_config_file<T: serde::de::DeserializeOwned + Default>(path: &str) -> anyhow::Result<T> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(T::default());
        }
        Err(e) => return Err(e.into()),
    };
    let config: T = serde_yaml::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid config file {}: {}", path, e))?;
    Ok(config)
}

/// Resolved conversion settings, passed by reference to every conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    /// Whether migrated monitors are created enabled.
    pub enable_monitors: bool,
    /// Frequency forced by the CLI; wins over the endpoint's own frequency.
    pub frequency_min: Option<String>,

    pub default_frequency_min: String,
    pub dns_record_type: String,
    pub tcp_default_execution_timeout: String,
    pub icmp_number_of_packets: String,
    pub icmp_packet_size: String,
    pub icmp_success_rate_percent: String,
    pub icmp_timeout_for_reply: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            enable_monitors: false,
            frequency_min: None,
            default_frequency_min: DEFAULT_FREQUENCY_MIN.to_string(),
            dns_record_type: DNS_RECORD_TYPE.to_string(),
            tcp_default_execution_timeout: TCP_DEFAULT_EXECUTION_TIMEOUT.to_string(),
            icmp_number_of_packets: ICMP_NUMBER_OF_PACKETS.to_string(),
            icmp_packet_size: ICMP_PACKET_SIZE.to_string(),
            icmp_success_rate_percent: ICMP_SUCCESS_RATE_PERCENT.to_string(),
            icmp_timeout_for_reply: ICMP_TIMEOUT_FOR_REPLY.to_string(),
        }
    }
}

impl ConverterConfig {
    /// Merge: config file > defaults.
    pub fn from_file(file: ConverterConfigFile) -> Self {
        let defaults = Self::default();
        let or_default = |v: Option<u32>, d: String| v.map(|n| n.to_string()).unwrap_or(d);
        Self {
            enable_monitors: defaults.enable_monitors,
            frequency_min: defaults.frequency_min,
            default_frequency_min: or_default(
                file.default_frequency_min,
                defaults.default_frequency_min,
            ),
            dns_record_type: file.dns_record_type.unwrap_or(defaults.dns_record_type),
            tcp_default_execution_timeout: or_default(
                file.tcp_default_execution_timeout,
                defaults.tcp_default_execution_timeout,
            ),
            icmp_number_of_packets: or_default(
                file.icmp_number_of_packets,
                defaults.icmp_number_of_packets,
            ),
            icmp_packet_size: or_default(file.icmp_packet_size, defaults.icmp_packet_size),
            icmp_success_rate_percent: or_default(
                file.icmp_success_rate_percent,
                defaults.icmp_success_rate_percent,
            ),
            icmp_timeout_for_reply: or_default(
                file.icmp_timeout_for_reply,
                defaults.icmp_timeout_for_reply,
            ),
        }
    }

    /// Apply the CLI-level overrides.
    pub fn with_overrides(mut self, enable_monitors: bool, frequency_min: Option<String>) -> Self {
        self.enable_monitors = enable_monitors;
        self.frequency_min = frequency_min;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let cfg = ConverterConfig::default();
        assert!(!cfg.enable_monitors);
        assert_eq!(cfg.frequency_min, None);
        assert_eq!(cfg.default_frequency_min, "1");
        assert_eq!(cfg.dns_record_type, "A");
        assert_eq!(cfg.tcp_default_execution_timeout, "2");
        assert_eq!(cfg.icmp_number_of_packets, "1");
        assert_eq!(cfg.icmp_packet_size, "32");
        assert_eq!(cfg.icmp_success_rate_percent, "80");
        assert_eq!(cfg.icmp_timeout_for_reply, "1");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        let file: ConverterConfigFile = load_config_file(path.to_str().unwrap()).unwrap();
        assert_eq!(ConverterConfig::from_file(file), ConverterConfig::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "icmp-packet-size: 64\nicmp-success-rate-percent: 75").unwrap();
        let file: ConverterConfigFile = load_config_file(tmp.path().to_str().unwrap()).unwrap();
        let cfg = ConverterConfig::from_file(file);
        assert_eq!(cfg.icmp_packet_size, "64");
        assert_eq!(cfg.icmp_success_rate_percent, "75");
        assert_eq!(cfg.icmp_number_of_packets, "1");
    }

    #[test]
    fn invalid_file_is_an_error() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "icmp-packet-size: [not, a, number]").unwrap();
        let res: anyhow::Result<ConverterConfigFile> = load_config_file(tmp.path().to_str().unwrap());
        assert!(res.is_err());
    }

    #[test]
    fn cli_overrides() {
        let cfg = ConverterConfig::default().with_overrides(true, Some("5".to_string()));
        assert!(cfg.enable_monitors);
        assert_eq!(cfg.frequency_min.as_deref(), Some("5"));
    }
}
