use pkg_constants::extensions::UNSUPPORTED_PORT_PROTOCOL;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// --- Inventory listing ---

/// Summary of one configured extension endpoint, as returned by the listing API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionInstance {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// One page of the extension instance listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtensionInstancePage {
    #[serde(default, rename = "configurationsList")]
    pub configurations: Vec<ExtensionInstance>,
    #[serde(default, rename = "nextPageKey")]
    pub next_page_key: Option<String>,
    #[serde(default, rename = "totalResults")]
    pub total_results: Option<u64>,
}

// --- Full endpoint configuration ---

/// Full configuration of a legacy endpoint.
///
/// The record is loosely typed: the keys of `properties` depend on the
/// extension, and any of them may be absent. Accessors treat absent keys
/// and falsy JSON values the same way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default, rename = "endpointName", skip_serializing_if = "Option::is_none")]
    pub endpoint_name: Option<String>,
    #[serde(default)]
    pub properties: Map<String, Value>,
    /// Remaining top-level keys (`extensionId`, `activeGate`, ...), kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EndpointConfig {
    /// Raw value of a property.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Raw value of a property, or `None` when it is absent or falsy.
    pub fn truthy(&self, key: &str) -> Option<&Value> {
        self.property(key).filter(|v| is_truthy(v))
    }

    /// Text of a property, or `None` when it is absent or falsy.
    pub fn text(&self, key: &str) -> Option<String> {
        self.truthy(key).map(value_text)
    }

    /// Text of a property, or an empty string when it is absent or falsy.
    pub fn text_or_empty(&self, key: &str) -> String {
        self.text(key).unwrap_or_default()
    }

    /// Name used for the migrated monitor: `test_name` if set, otherwise the endpoint name.
    pub fn display_name(&self) -> String {
        self.text("test_name")
            .or_else(|| self.endpoint_name.clone())
            .unwrap_or_default()
    }

    pub fn uses_proxy(&self) -> bool {
        self.text("proxy_address").is_some()
    }

    /// Whether a port endpoint probes over UDP, which NAM cannot monitor.
    pub fn uses_udp(&self) -> bool {
        self.text("test_protocol").as_deref() == Some(UNSUPPORTED_PORT_PROTOCOL)
    }
}

/// JSON truthiness: `null`, `false`, `0`, `""` and empty containers are falsy.
/// The string `"0"` is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
