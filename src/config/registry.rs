//! Service registry file (`.ergo`) loading and appending
//!
//! The registry holds one service per line as `<name> <target>`, separated by
//! whitespace. Blank lines and lines starting with `#` are ignored.

use crate::error::RegistryError;
use crate::types::Service;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Source of registered services
///
/// The resolver loads services through this trait so tests can substitute
/// the file system.
pub trait ServiceLoader {
    /// Loads every service registered at `path`
    ///
    /// # Errors
    ///
    /// Returns `RegistryError` if the registry cannot be read or parsed.
    fn load(&self, path: &Path) -> Result<Vec<Service>, RegistryError>;
}

impl<T: ServiceLoader + ?Sized> ServiceLoader for &T {
    fn load(&self, path: &Path) -> Result<Vec<Service>, RegistryError> {
        (**self).load(path)
    }
}

/// Loads services from a registry file on disk
#[derive(Debug, Clone, Copy, Default)]
pub struct FileRegistry;

impl ServiceLoader for FileRegistry {
    fn load(&self, path: &Path) -> Result<Vec<Service>, RegistryError> {
        let content = fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        parse_services(path, &content)
    }
}

/// Parses registry content
///
/// `path` is only used for error reporting.
///
/// # Errors
///
/// Returns `RegistryError::MalformedLine` for a line with fewer than two fields.
pub fn parse_services(path: &Path, content: &str) -> Result<Vec<Service>, RegistryError> {
    let mut services = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split_whitespace();
        match (fields.next(), fields.next()) {
            (Some(name), Some(target)) => services.push(Service::new(name, target)),
            _ => {
                return Err(RegistryError::MalformedLine {
                    path: path.to_path_buf(),
                    line: index + 1,
                });
            }
        }
    }

    Ok(services)
}

/// Appends a service entry to the registry at `path`
///
/// The file is created if it does not exist.
///
/// # Errors
///
/// Returns `RegistryError::Io` if the registry cannot be read or written.
pub fn append_service(path: &Path, service: &Service) -> Result<(), RegistryError> {
    let io_err = |source| RegistryError::Io {
        path: path.to_path_buf(),
        source,
    };

    let needs_newline = match fs::read_to_string(path) {
        Ok(existing) => !existing.is_empty() && !existing.ends_with('\n'),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => return Err(io_err(e)),
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_err)?;

    if needs_newline {
        writeln!(file).map_err(io_err)?;
    }
    writeln!(file, "{} {}", service.name(), service.target()).map_err(io_err)?;

    Ok(())
}
