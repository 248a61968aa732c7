#![forbid(unsafe_code)]

//! Core domain types for ergo
//!
//! This module defines the values that flow from argument resolution into
//! the operations: domains, services and setup targets.

use std::fmt;
use std::str::FromStr;

/// Domain used when `-domain` is not given
pub const DEFAULT_DOMAIN: &str = ".dev";

/// A validated service domain suffix
///
/// Domains always begin with `.` (for example `.dev`), so that
/// `<name><domain>` forms a host name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Domain(String);

impl Domain {
    /// Creates a new Domain, validating the input
    ///
    /// Returns None if the input does not start with `.`
    pub fn new(domain: impl Into<String>) -> Option<Self> {
        let domain = domain.into();
        if !domain.starts_with('.') {
            return None;
        }
        Some(Domain(domain))
    }

    /// Returns the domain as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Domain {
    fn default() -> Self {
        Domain(DEFAULT_DOMAIN.to_string())
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Domain {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Domain::new(value).ok_or_else(|| "Domain must start with '.'".to_string())
    }
}

/// A named backend the proxy can route to
///
/// The target is kept as given (`host:port`); it is not validated here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Service {
    name: String,
    target: String,
}

impl Service {
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Service {
            name: name.into(),
            target: target.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// URL the service is reachable at through the proxy
    pub fn url(&self, domain: &Domain) -> String {
        format!("http://{}{}", self.name, domain)
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.name, self.target)
    }
}

/// Systems `ergo setup` knows how to configure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum System {
    LinuxGnome,
    Osx,
    Windows,
}

impl System {
    pub const ALL: [System; 3] = [System::LinuxGnome, System::Osx, System::Windows];

    pub fn as_str(&self) -> &'static str {
        match self {
            System::LinuxGnome => "linux-gnome",
            System::Osx => "osx",
            System::Windows => "windows",
        }
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for System {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        System::ALL
            .into_iter()
            .find(|system| system.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_requires_leading_dot() {
        assert!(Domain::new(".dev").is_some());
        assert!(Domain::new(".test.local").is_some());
        assert!(Domain::new("dev").is_none());
        assert!(Domain::new("").is_none());
    }

    #[test]
    fn test_domain_default() {
        assert_eq!(Domain::default().as_str(), ".dev");
    }

    #[test]
    fn test_domain_try_from() {
        let domain: Result<Domain, _> = ".localhost".to_string().try_into();
        assert_eq!(domain.unwrap().to_string(), ".localhost");

        let invalid: Result<Domain, _> = "localhost".to_string().try_into();
        assert!(invalid.is_err());
    }

    #[test]
    fn test_service_accessors() {
        let service = Service::new("foo", "127.0.0.1:8080");
        assert_eq!(service.name(), "foo");
        assert_eq!(service.target(), "127.0.0.1:8080");
        assert_eq!(service.to_string(), "foo -> 127.0.0.1:8080");
    }

    #[test]
    fn test_service_url() {
        let service = Service::new("api", "localhost:3000");
        let domain = Domain::new(".test").unwrap();
        assert_eq!(service.url(&domain), "http://api.test");
        assert_eq!(service.url(&Domain::default()), "http://api.dev");
    }

    #[test]
    fn test_system_parse() {
        assert_eq!("osx".parse::<System>(), Ok(System::Osx));
        assert_eq!("linux-gnome".parse::<System>(), Ok(System::LinuxGnome));
        assert_eq!("windows".parse::<System>(), Ok(System::Windows));
        assert_eq!("beos".parse::<System>(), Err("beos".to_string()));
    }

    #[test]
    fn test_system_round_trips_through_display() {
        for system in System::ALL {
            assert_eq!(system.to_string().parse::<System>(), Ok(system));
        }
    }
}
