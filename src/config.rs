//! Proxy configuration and the service registry

pub mod configuration;
pub mod registry;

pub use configuration::{Configuration, DEFAULT_CONFIG_FILE, DEFAULT_PORT};
pub use registry::{FileRegistry, ServiceLoader, append_service};
