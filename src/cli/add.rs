//! `ergo add <service-name> <host:port>`
//!
//! Appends a service to the registry named by `-config`. Names must be
//! unique among the services already loaded from that registry.

use std::io::{self, Write};
use tracing::debug;

use crate::cli::common::finish;
use crate::config::{Configuration, append_service};
use crate::error::ErgoError;
use crate::types::Service;

/// Run the add command
pub fn run_add(config: &Configuration, service: &Service) -> i32 {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    finish(add_service(&mut out, config, service))
}

/// Appends `service` to the registry and reports it
///
/// # Errors
///
/// Returns `ErgoError::DuplicateService` if a service with the same name is
/// already registered, or `ErgoError::Registry` if the registry cannot be
/// written.
pub fn add_service<W: Write>(
    out: &mut W,
    config: &Configuration,
    service: &Service,
) -> Result<(), ErgoError> {
    if config.find_service(service.name()).is_some() {
        return Err(ErgoError::DuplicateService(service.name().to_string()));
    }

    append_service(&config.config_file, service)?;
    debug!(path = %config.config_file.display(), service = %service, "Service appended");

    writeln!(out, "Service added: {}", service)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FileRegistry, ServiceLoader};
    use std::fs;
    use tempfile::TempDir;

    fn config_in(temp_dir: &TempDir) -> Configuration {
        let mut config = Configuration::new();
        config.config_file = temp_dir.path().join(".ergo");
        config
    }

    #[test]
    fn test_add_service_creates_registry() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir);
        let service = Service::new("foo", "127.0.0.1:8080");

        let mut output = Vec::new();
        add_service(&mut output, &config, &service).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Service added: foo -> 127.0.0.1:8080\n"
        );
        assert_eq!(
            FileRegistry.load(&config.config_file).unwrap(),
            vec![service]
        );
    }

    #[test]
    fn test_add_service_rejects_duplicate() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = config_in(&temp_dir);
        fs::write(&config.config_file, "foo localhost:1\n").unwrap();
        config.services = FileRegistry.load(&config.config_file).unwrap();

        let mut output = Vec::new();
        let result = add_service(&mut output, &config, &Service::new("foo", "localhost:2"));

        assert!(matches!(result, Err(ErgoError::DuplicateService(name)) if name == "foo"));
        assert_eq!(
            fs::read_to_string(&config.config_file).unwrap(),
            "foo localhost:1\n"
        );
    }

    #[test]
    fn test_add_service_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Configuration::new();
        config.config_file = temp_dir.path().join("missing").join(".ergo");

        let mut output = Vec::new();
        let result = add_service(&mut output, &config, &Service::new("foo", "localhost:1"));

        assert!(matches!(result, Err(ErgoError::Registry(_))));
    }
}
