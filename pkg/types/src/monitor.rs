use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::kind::MonitorKind;

/// NAM (Network Application Monitor) configuration, as accepted by the
/// synthetic monitors API.
///
/// Only the fields the migration writes are typed. Everything else in the
/// template (`type`, `outageHandling`, `performanceThresholds`, ...) is kept
/// in `extra` and serialized back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamMonitor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    /// Minutes between executions, written as given: a CLI override is
    /// text, an endpoint's own frequency keeps its JSON type.
    #[serde(default)]
    pub frequency_min: Value,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub steps: Vec<MonitorStep>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The single execution unit of a NAM monitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorStep {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub request_type: Option<MonitorKind>,
    #[serde(default)]
    pub target_list: Vec<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
    #[serde(default)]
    pub request_configurations: Vec<RequestConfiguration>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestConfiguration {
    #[serde(default)]
    pub constraints: Vec<Constraint>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A pass/fail assertion evaluated against an execution result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Constraint {
    pub fn new(kind: &str, properties: &[(&str, &str)]) -> Self {
        Self {
            kind: kind.to_string(),
            properties: properties
                .iter()
                .map(|(k, v)| (k.to_string(), Value::from(*v)))
                .collect(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// `context`, `source`, ... of tags coming from the template.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Tag {
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: Some(value.to_string()),
            extra: Map::new(),
        }
    }
}

impl NamMonitor {
    /// The first (and only) step of the monitor.
    pub fn step(&self) -> Option<&MonitorStep> {
        self.steps.first()
    }

    /// Constraints of the step's first request configuration.
    pub fn constraints(&self) -> &[Constraint] {
        self.step()
            .and_then(|s| s.request_configurations.first())
            .map(|rc| rc.constraints.as_slice())
            .unwrap_or_default()
    }

    /// Value of the tag with the given key, if present.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.key == key)
            .and_then(|t| t.value.as_deref())
    }
}
