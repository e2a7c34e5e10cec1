//! Field mapping from a legacy endpoint to a NAM monitor.
//!
//! Each monitor kind has its own translation producing the step target,
//! step properties and constraints. The result is merged into a copy of
//! the monitor template together with the fields shared by all kinds.

use chrono::{DateTime, Local};
use pkg_constants::converter::{DNS_EXPECTED_STATUS, GENERATION_DATE_FORMAT, GENERATION_DATE_TAG};
use pkg_types::config::ConverterConfig;
use pkg_types::endpoint::EndpointConfig;
use pkg_types::kind::MonitorKind;
use pkg_types::monitor::{Constraint, NamMonitor, Tag};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::template::MonitorTemplate;

/// Kind-specific part of a monitor step.
#[derive(Debug, Default, PartialEq)]
struct StepTranslation {
    target: String,
    properties: BTreeMap<String, Value>,
    constraints: Vec<Constraint>,
}

/// Convert one endpoint, tagging the result with the current local time.
pub fn convert_endpoint(
    kind: MonitorKind,
    endpoint: &EndpointConfig,
    locations: &[String],
    config: &ConverterConfig,
    template: &MonitorTemplate,
) -> NamMonitor {
    convert_endpoint_at(kind, endpoint, locations, config, template, Local::now())
}

/// Convert one endpoint with an explicit generation timestamp.
pub fn convert_endpoint_at(
    kind: MonitorKind,
    endpoint: &EndpointConfig,
    locations: &[String],
    config: &ConverterConfig,
    template: &MonitorTemplate,
    generated_at: DateTime<Local>,
) -> NamMonitor {
    let name = endpoint.display_name();
    let translation = match kind {
        MonitorKind::Dns => translate_dns(endpoint, config),
        MonitorKind::Icmp => translate_icmp(endpoint, config),
        MonitorKind::Tcp => translate_tcp(endpoint, config),
    };

    let mut monitor = template.instantiate();
    monitor.enabled = config.enable_monitors;
    monitor.frequency_min = resolve_frequency(
        config.frequency_min.as_deref(),
        endpoint,
        &config.default_frequency_min,
    );
    monitor.locations = locations.to_vec();
    monitor.name = name.clone();

    // MonitorTemplate guarantees one step with one request configuration.
    if let Some(step) = monitor.steps.first_mut() {
        step.name = name;
        step.properties = translation.properties;
        step.request_type = Some(kind);
        step.target_list = vec![translation.target];
        if let Some(request) = step.request_configurations.first_mut() {
            request.constraints = translation.constraints;
        }
    }

    monitor.tags.push(Tag::new(
        GENERATION_DATE_TAG,
        &generated_at.format(GENERATION_DATE_FORMAT).to_string(),
    ));
    monitor
}

/// Pick the monitor frequency. First non-empty value wins:
/// CLI override, then the endpoint's own `frequency`, then the default.
///
/// The endpoint value is checked for truthiness only, so `"0"` is kept as is,
/// and it is copied with its JSON type (`10` stays a number).
pub fn resolve_frequency(cli_override: Option<&str>, endpoint: &EndpointConfig, default: &str) -> Value {
    match cli_override {
        Some(freq) if !freq.is_empty() => Value::from(freq),
        _ => endpoint
            .truthy("frequency")
            .cloned()
            .unwrap_or_else(|| Value::from(default)),
    }
}

fn translate_dns(endpoint: &EndpointConfig, config: &ConverterConfig) -> StepTranslation {
    let mut properties = BTreeMap::new();
    properties.insert(
        "DNS_RECORD_TYPES".to_string(),
        Value::from(config.dns_record_type.as_str()),
    );
    if let Some(server) = endpoint.text("dns_server") {
        properties.insert("DNS_SERVER".to_string(), Value::from(server));
    }
    StepTranslation {
        target: endpoint.text_or_empty("host"),
        properties,
        constraints: vec![Constraint::new(
            "DNS_STATUS_CODE",
            &[("operator", "="), ("status", DNS_EXPECTED_STATUS)],
        )],
    }
}

fn translate_icmp(endpoint: &EndpointConfig, config: &ConverterConfig) -> StepTranslation {
    let properties = BTreeMap::from([
        (
            "ICMP_NUMBER_OF_PACKETS".to_string(),
            Value::from(config.icmp_number_of_packets.as_str()),
        ),
        (
            "ICMP_PACKET_SIZE".to_string(),
            Value::from(config.icmp_packet_size.as_str()),
        ),
        (
            "ICMP_TIMEOUT_FOR_REPLY".to_string(),
            iso_seconds(&config.icmp_timeout_for_reply),
        ),
    ]);
    StepTranslation {
        target: endpoint.text_or_empty("test_target"),
        properties,
        constraints: vec![Constraint::new(
            "ICMP_SUCCESS_RATE_PERCENT",
            &[
                ("operator", ">="),
                ("value", config.icmp_success_rate_percent.as_str()),
            ],
        )],
    }
}

fn translate_tcp(endpoint: &EndpointConfig, config: &ConverterConfig) -> StepTranslation {
    let mut properties = BTreeMap::new();
    if endpoint.text("test_timeout").as_deref() == Some("0") {
        properties.insert(
            "EXECUTION_TIMEOUT".to_string(),
            iso_seconds(&config.tcp_default_execution_timeout),
        );
    }
    properties.insert(
        "TCP_PORT_RANGES".to_string(),
        Value::from(endpoint.text_or_empty("test_target_ports")),
    );
    StepTranslation {
        target: endpoint.text_or_empty("test_target_ip"),
        properties,
        constraints: Vec::new(),
    }
}

/// ISO-8601 duration in whole seconds, e.g. `PT2S`.
fn iso_seconds(seconds: &str) -> Value {
    Value::from(format!("PT{}S", seconds))
}
