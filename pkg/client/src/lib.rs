//! Access to the tenant's configuration and synthetic monitor APIs.

pub mod client;
pub mod traits;

pub use client::DynatraceClient;
pub use traits::{ApiResponse, EndpointInventory, MonitorApi};
