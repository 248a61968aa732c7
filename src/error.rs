//! Error types for ergo
//!
//! Usage errors describe why an argument vector did not resolve to an action.
//! They are never shown to the user directly; the entry point prints the usage
//! text instead. Registry and operation errors are reported by the operation
//! that hit them.

use crate::cli::grammar::Arity;
use std::path::PathBuf;

/// Reasons an argument vector does not resolve to an action
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    /// Only the program name was given
    #[error("no operation given")]
    MissingOperation,

    /// The operation token is not one of the known operations
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// Flags for the operation could not be parsed
    #[error("invalid flags for {operation}: {message}")]
    Flags { operation: String, message: String },

    /// Wrong number of positional arguments
    #[error("{operation} expects {expected} positional argument(s), got {found}")]
    Arity {
        operation: String,
        expected: Arity,
        found: usize,
    },

    /// The domain does not start with a dot
    #[error("invalid domain {0:?}: domains must start with '.'")]
    InvalidDomain(String),
}

/// Service registry errors
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The registry file could not be read or written
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A registry line does not carry both a name and a target
    #[error("malformed service entry in {path} at line {line}")]
    MalformedLine { path: PathBuf, line: usize },
}

/// Top-level error type for ergo operations
#[derive(Debug, thiserror::Error)]
pub enum ErgoError {
    /// Usage error
    #[error("Usage error: {0}")]
    Usage(#[from] UsageError),

    /// Service registry error
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// No service with the given name is registered
    #[error("service not found: {0}")]
    ServiceNotFound(String),

    /// A service with the given name is already registered
    #[error("service already registered: {0}")]
    DuplicateService(String),

    /// The setup target is not a supported system
    #[error("unknown system {0:?}, expected one of: linux-gnome, osx, windows")]
    UnknownSystem(String),

    /// The proxy server is not part of this build
    #[error("the proxy server is not available in this build (port {port})")]
    ProxyUnavailable { port: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
