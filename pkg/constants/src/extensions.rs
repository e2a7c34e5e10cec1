//! Identifiers of the legacy third-party extensions.

/// Extension id of the third-party DNS extension.
pub const DNS_EXTENSION_ID: &str = "custom.remote.python.thirdparty_dns";

/// Extension id of the third-party ping extension.
pub const PING_EXTENSION_ID: &str = "custom.remote.python.thirdparty_ping";

/// Extension id of the third-party port extension.
pub const PORT_EXTENSION_ID: &str = "custom.remote.python.thirdparty_port";

/// Transport protocol value of port endpoints that NAM cannot monitor.
pub const UNSUPPORTED_PORT_PROTOCOL: &str = "UDP";
