#![forbid(unsafe_code)]

//! ergo: the local proxy agent for multiple services development
//!
//! This crate turns a command line into a single validated [`cli::Action`]
//! (list services, print a URL, register the proxy, add a service, ...) or
//! a request to show usage.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod types;

// Re-export error types for convenient access
pub use error::{ErgoError, RegistryError, UsageError};

// Re-export core domain types for convenient access
pub use config::Configuration;
pub use types::{Domain, Service, System};
