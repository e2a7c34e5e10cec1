pub mod config;
pub mod endpoint;
pub mod kind;
pub mod monitor;
pub mod validate;
