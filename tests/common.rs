//! Test utilities for ergo integration tests

#![allow(dead_code)]

use ergo::RegistryError;
use ergo::Service;
use ergo::config::ServiceLoader;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

/// Result type alias for tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Extract Some value or panic with context
#[macro_export]
macro_rules! assert_some {
    ($expr:expr) => {
        assert_some!($expr, "expected Some")
    };
    ($expr:expr, $msg:literal) => {
        $expr.unwrap_or_else(|| panic!("{}: got None", $msg))
    };
}

/// Loader returning a fixed set of services and recording requested paths
pub struct RecordingLoader {
    pub services: Vec<Service>,
    pub requested: RefCell<Vec<PathBuf>>,
}

impl RecordingLoader {
    pub fn with(services: Vec<Service>) -> Self {
        RecordingLoader {
            services,
            requested: RefCell::new(Vec::new()),
        }
    }
}

impl ServiceLoader for RecordingLoader {
    fn load(&self, path: &Path) -> Result<Vec<Service>, RegistryError> {
        self.requested.borrow_mut().push(path.to_path_buf());
        Ok(self.services.clone())
    }
}

/// Loader that always fails, as an unreadable registry would
pub struct FailingLoader;

impl ServiceLoader for FailingLoader {
    fn load(&self, path: &Path) -> Result<Vec<Service>, RegistryError> {
        Err(RegistryError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        })
    }
}
