//! Per-invocation proxy configuration
//!
//! A `Configuration` is assembled by the resolver from parsed flags and the
//! services found in the registry, then moved into the action it produces.

use crate::types::{Domain, Service};
use std::path::PathBuf;

/// Registry file used when `-config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "./.ergo";

/// Proxy port used when `-p` is not given
pub const DEFAULT_PORT: &str = "2000";

/// Validated set of proxy parameters for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Location of the service registry
    pub config_file: PathBuf,
    /// Domain suffix appended to service names
    pub domain: Domain,
    /// Services loaded from `config_file`, empty if loading failed
    pub services: Vec<Service>,
    /// Port the proxy listens on
    pub port: String,
    /// Verbose proxy output
    pub verbose: bool,
}

impl Configuration {
    /// Creates a configuration with every field at its default
    pub fn new() -> Self {
        Configuration {
            config_file: PathBuf::from(DEFAULT_CONFIG_FILE),
            domain: Domain::default(),
            services: Vec::new(),
            port: DEFAULT_PORT.to_string(),
            verbose: false,
        }
    }

    /// Looks up a loaded service by name
    pub fn find_service(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|service| service.name() == name)
    }

    /// Address of the proxy auto-config script served by `ergo run`
    pub fn pac_url(&self) -> String {
        format!("http://127.0.0.1:{}/proxy.pac", self.port)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}
