use pkg_constants::extensions::{DNS_EXTENSION_ID, PING_EXTENSION_ID, PORT_EXTENSION_ID};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Request type of a NAM monitor step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonitorKind {
    #[serde(rename = "DNS")]
    Dns,
    #[serde(rename = "ICMP")]
    Icmp,
    #[serde(rename = "TCP")]
    Tcp,
}

impl MonitorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MonitorKind::Dns => "DNS",
            MonitorKind::Icmp => "ICMP",
            MonitorKind::Tcp => "TCP",
        }
    }
}

impl std::fmt::Display for MonitorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Legacy third-party extension an endpoint belongs to.
/// Each extension migrates to exactly one [`MonitorKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtensionKind {
    Dns,
    Ping,
    Port,
}

impl ExtensionKind {
    /// Every supported extension, in migration order.
    pub const ALL: [ExtensionKind; 3] = [ExtensionKind::Dns, ExtensionKind::Ping, ExtensionKind::Port];

    pub fn as_str(self) -> &'static str {
        match self {
            ExtensionKind::Dns => "dns",
            ExtensionKind::Ping => "ping",
            ExtensionKind::Port => "port",
        }
    }

    /// Id of the extension in the configuration API.
    pub fn extension_id(self) -> &'static str {
        match self {
            ExtensionKind::Dns => DNS_EXTENSION_ID,
            ExtensionKind::Ping => PING_EXTENSION_ID,
            ExtensionKind::Port => PORT_EXTENSION_ID,
        }
    }

    pub fn monitor_kind(self) -> MonitorKind {
        match self {
            ExtensionKind::Dns => MonitorKind::Dns,
            ExtensionKind::Ping => MonitorKind::Icmp,
            ExtensionKind::Port => MonitorKind::Tcp,
        }
    }
}

impl std::fmt::Display for ExtensionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtensionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dns" => Ok(ExtensionKind::Dns),
            "ping" => Ok(ExtensionKind::Ping),
            "port" => Ok(ExtensionKind::Port),
            other => Err(format!(
                "unknown extension type '{}', expected one of: dns, ping, port",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_maps_to_monitor_kind() {
        assert_eq!(ExtensionKind::Dns.monitor_kind(), MonitorKind::Dns);
        assert_eq!(ExtensionKind::Ping.monitor_kind(), MonitorKind::Icmp);
        assert_eq!(ExtensionKind::Port.monitor_kind(), MonitorKind::Tcp);
    }

    #[test]
    fn extension_ids() {
        assert_eq!(
            ExtensionKind::Ping.extension_id(),
            "custom.remote.python.thirdparty_ping"
        );
        assert_eq!(
            ExtensionKind::Port.extension_id(),
            "custom.remote.python.thirdparty_port"
        );
    }

    #[test]
    fn parse_extension_kind() {
        assert_eq!("dns".parse::<ExtensionKind>(), Ok(ExtensionKind::Dns));
        assert_eq!("port".parse::<ExtensionKind>(), Ok(ExtensionKind::Port));
        assert!("DNS".parse::<ExtensionKind>().is_err());
        assert!("http".parse::<ExtensionKind>().is_err());
    }

    #[test]
    fn monitor_kind_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&MonitorKind::Icmp).unwrap(), "\"ICMP\"");
        let kind: MonitorKind = serde_json::from_str("\"TCP\"").unwrap();
        assert_eq!(kind, MonitorKind::Tcp);
    }
}
