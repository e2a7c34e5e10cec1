//! Conversion of legacy extension endpoints into NAM monitor configurations.

pub mod mapper;
pub mod template;

pub use mapper::{convert_endpoint, convert_endpoint_at, resolve_frequency};
pub use template::MonitorTemplate;
