//! Argument resolution and operation dispatch

pub mod action;
pub mod add;
pub mod common;
pub mod grammar;
pub mod list;
pub mod resolver;
pub mod run;
pub mod setup;
pub mod url;
pub mod usage;

// Re-export types for convenient access
pub use action::Action;
pub use grammar::{Arity, Operation};
pub use resolver::{Resolution, Resolver, resolve};
pub use usage::{USAGE, print_usage};
