use anyhow::Result;
use pkg_types::endpoint::{EndpointConfig, ExtensionInstance};
use serde_json::Value;

/// Read-only view of the legacy extension endpoints.
pub trait EndpointInventory {
    /// List every configured endpoint of an extension.
    fn list_instances(&self, extension_id: &str) -> Result<Vec<ExtensionInstance>>;

    /// Fetch the full configuration of one endpoint.
    fn full_configuration(&self, extension_id: &str, instance_id: &str) -> Result<EndpointConfig>;
}

/// Raw HTTP answer of the monitor API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    /// The monitor API signals creation with exactly 200.
    pub fn is_created(&self) -> bool {
        self.status == 200
    }
}

/// Creates NAM monitors.
pub trait MonitorApi {
    /// Submit one monitor definition. Transport failures are errors;
    /// any HTTP answer, including non-2xx, is returned as a response.
    fn create_monitor(&self, monitor: &Value) -> Result<ApiResponse>;
}
