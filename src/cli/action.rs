//! Deferred operations produced by resolution
//!
//! An [`Action`] carries everything its operation needs. Executing it
//! consumes it, so each action runs at most once.

use crate::cli::grammar::Operation;
use crate::config::Configuration;
use crate::types::Service;

/// A fully validated operation, ready to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Print the version string
    Version { version: String },
    /// List services with their URLs
    List { config: Configuration },
    /// List service names only
    ListNames { config: Configuration },
    /// Register (or remove) the proxy with the operating system
    Setup {
        system: String,
        remove: bool,
        config: Configuration,
    },
    /// Print the URL of a single service
    Url { name: String, config: Configuration },
    /// Start the proxy
    Run { config: Configuration },
    /// Append a service to the registry
    Add {
        config: Configuration,
        service: Service,
    },
}

impl Action {
    /// Operation this action performs, `None` for the version action
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Action::Version { .. } => None,
            Action::List { .. } => Some(Operation::List),
            Action::ListNames { .. } => Some(Operation::ListNames),
            Action::Setup { .. } => Some(Operation::Setup),
            Action::Url { .. } => Some(Operation::Url),
            Action::Run { .. } => Some(Operation::Run),
            Action::Add { .. } => Some(Operation::Add),
        }
    }

    /// Configuration bound to this action
    pub fn config(&self) -> Option<&Configuration> {
        match self {
            Action::Version { .. } => None,
            Action::List { config }
            | Action::ListNames { config }
            | Action::Setup { config, .. }
            | Action::Url { config, .. }
            | Action::Run { config }
            | Action::Add { config, .. } => Some(config),
        }
    }

    /// Runs the operation and returns the process exit code
    pub fn execute(self) -> i32 {
        match self {
            Action::Version { version } => {
                println!("version: {}", version);
                crate::cli::common::EXIT_SUCCESS
            }
            Action::List { config } => crate::cli::list::run_list(&config),
            Action::ListNames { config } => crate::cli::list::run_list_names(&config),
            Action::Setup {
                system,
                remove,
                config,
            } => crate::cli::setup::run_setup(&system, remove, &config),
            Action::Url { name, config } => crate::cli::url::run_url(&name, &config),
            Action::Run { config } => crate::cli::run::run_proxy(&config),
            Action::Add { config, service } => crate::cli::add::run_add(&config, &service),
        }
    }
}
