//! Default tunables used when converting endpoints to NAM monitors.

// ─── Scheduling ──────────────────────────────────────────────────────────────

/// Frequency used when neither the CLI nor the endpoint declares one.
pub const DEFAULT_FREQUENCY_MIN: &str = "1";

/// Frequencies (minutes) accepted by the NAM scheduler.
pub const VALID_FREQUENCIES_MIN: &[u32] = &[1, 2, 5, 10, 15, 30, 60];

// ─── DNS ─────────────────────────────────────────────────────────────────────

/// Record type queried by migrated DNS monitors.
pub const DNS_RECORD_TYPE: &str = "A";

/// DNS status code required by the migrated DNS constraint.
pub const DNS_EXPECTED_STATUS: &str = "NOERROR";

// ─── ICMP ────────────────────────────────────────────────────────────────────

pub const ICMP_NUMBER_OF_PACKETS: &str = "1";

/// Packet size in bytes.
pub const ICMP_PACKET_SIZE: &str = "32";

/// Minimum success rate (percent) for an ICMP execution to pass.
pub const ICMP_SUCCESS_RATE_PERCENT: &str = "80";

/// Reply timeout in seconds.
pub const ICMP_TIMEOUT_FOR_REPLY: &str = "1";

// ─── TCP ─────────────────────────────────────────────────────────────────────

/// Execution timeout in seconds applied when the endpoint declares `test_timeout = "0"`.
pub const TCP_DEFAULT_EXECUTION_TIMEOUT: &str = "2";

// ─── Tags ────────────────────────────────────────────────────────────────────

/// Tag key carrying the generation timestamp.
pub const GENERATION_DATE_TAG: &str = "generation-date";

/// `chrono` format of the generation timestamp.
pub const GENERATION_DATE_FORMAT: &str = "%Y%m%d-%H%M%S";
