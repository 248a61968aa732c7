//! Command resolution
//!
//! Maps a raw argument vector to exactly one [`Action`], a request for help,
//! or the reason the arguments are invalid. Parsing is layered and single
//! pass:
//!
//! 1. top-level flags (`-h`, `-v`) up to the operation token
//! 2. the operation's own flags and positionals, from its grammar entry
//! 3. positional arity
//!
//! Resolution never fails hard. A service registry that cannot be loaded is
//! logged and treated as empty.

use clap::ArgMatches;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::cli::action::Action;
use crate::cli::grammar::{
    self, Arity, CONFIG_FLAG, DOMAIN_FLAG, FlagSpec, HELP_FLAG, Operation, OperationSpec, POSITIONALS,
    PORT_FLAG, REMOVE_FLAG, TOP_LEVEL_FLAGS, VERBOSE_FLAG, VERSION_FLAG,
};
use crate::config::{Configuration, FileRegistry, ServiceLoader};
use crate::error::UsageError;
use crate::types::{Domain, Service};

/// Outcome of resolving an argument vector
#[derive(Debug)]
pub enum Resolution {
    /// The arguments name a valid operation
    Resolved(Action),
    /// `-h` was given
    HelpRequested,
    /// The arguments do not form a valid invocation
    Invalid(UsageError),
}

impl Resolution {
    /// Collapses help and usage errors into `None`
    pub fn into_action(self) -> Option<Action> {
        match self {
            Resolution::Resolved(action) => Some(action),
            Resolution::HelpRequested | Resolution::Invalid(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

/// Resolves argument vectors against the ergo grammar
///
/// The version string is injected at construction and only surfaces through
/// [`Action::Version`].
#[derive(Debug)]
pub struct Resolver<L> {
    version: String,
    loader: L,
}

impl Resolver<FileRegistry> {
    /// Resolver that loads services from registry files on disk
    pub fn with_file_registry(version: impl Into<String>) -> Self {
        Resolver::new(version, FileRegistry)
    }
}

impl<L: ServiceLoader> Resolver<L> {
    pub fn new(version: impl Into<String>, loader: L) -> Self {
        Resolver {
            version: version.into(),
            loader,
        }
    }

    /// Resolves a full argument vector, program name included
    pub fn resolve<S: AsRef<str>>(&self, args: &[S]) -> Resolution {
        if args.len() < 2 {
            return Resolution::Invalid(UsageError::MissingOperation);
        }

        let top = match parse(grammar::top_level_command(), args, TOP_LEVEL_FLAGS, "ergo") {
            Ok(matches) => matches,
            Err(e) => return Resolution::Invalid(e),
        };

        if top.get_flag(VERSION_FLAG.name) {
            return Resolution::Resolved(Action::Version {
                version: self.version.clone(),
            });
        }
        if top.get_flag(HELP_FLAG.name) {
            return Resolution::HelpRequested;
        }

        let token = args[1].as_ref();
        let Some(operation) = Operation::from_token(token) else {
            return Resolution::Invalid(UsageError::UnknownOperation(token.to_string()));
        };

        match self.resolve_operation(operation, &args[2..]) {
            Ok(Some(action)) => {
                debug!(operation = %operation, "Resolved operation");
                Resolution::Resolved(action)
            }
            Ok(None) => Resolution::HelpRequested,
            Err(e) => Resolution::Invalid(e),
        }
    }

    /// Parses the tokens following the operation token
    ///
    /// Returns `Ok(None)` when `-h` was given after the operation; the caller
    /// reports that as [`Resolution::HelpRequested`].
    fn resolve_operation<S: AsRef<str>>(
        &self,
        operation: Operation,
        tokens: &[S],
    ) -> Result<Option<Action>, UsageError> {
        let spec = operation.spec();

        // Exact operations take their positionals and nothing else, not even `--`.
        if let Arity::Exactly(count) = spec.arity {
            if tokens.len() != count {
                return Err(UsageError::Arity {
                    operation: operation.to_string(),
                    expected: spec.arity,
                    found: tokens.len(),
                });
            }
        }

        let matches = parse(spec.command(), tokens, spec.flags, operation.as_str())?;

        if matches.get_flag(HELP_FLAG.name) {
            return Ok(None);
        }

        let positionals: Vec<String> = matches
            .get_many::<String>(POSITIONALS)
            .map(|values| values.cloned().collect())
            .unwrap_or_default();

        if !spec.arity.accepts(positionals.len()) {
            return Err(UsageError::Arity {
                operation: operation.to_string(),
                expected: spec.arity,
                found: positionals.len(),
            });
        }

        let mut config = build_configuration(spec, &matches)?;
        config.services = self.load_services(&config.config_file);

        let mut positionals = positionals.into_iter();
        let action = match operation {
            Operation::List => Action::List { config },
            Operation::ListNames => Action::ListNames { config },
            Operation::Setup => Action::Setup {
                system: positionals.next().unwrap_or_default(),
                remove: switch(spec, &matches, &REMOVE_FLAG),
                config,
            },
            Operation::Url => Action::Url {
                name: positionals.next().unwrap_or_default(),
                config,
            },
            Operation::Run => Action::Run { config },
            Operation::Add => {
                let name = positionals.next().unwrap_or_default();
                let target = positionals.next().unwrap_or_default();
                Action::Add {
                    config,
                    service: Service::new(name, target),
                }
            }
        };

        Ok(Some(action))
    }

    fn load_services(&self, path: &Path) -> Vec<Service> {
        match self.loader.load(path) {
            Ok(services) => services,
            Err(e) => {
                warn!("Could not load services: {}", e);
                Vec::new()
            }
        }
    }
}

/// Resolves `args` using the on-disk registry and this crate's version
pub fn resolve<S: AsRef<str>>(args: &[S]) -> Option<Action> {
    Resolver::with_file_registry(env!("CARGO_PKG_VERSION"))
        .resolve(args)
        .into_action()
}

fn parse<S: AsRef<str>>(
    command: clap::Command,
    tokens: &[S],
    flags: &[FlagSpec],
    operation: &str,
) -> Result<ArgMatches, UsageError> {
    command
        .try_get_matches_from(grammar::normalize_flags(tokens, flags))
        .map_err(|e| UsageError::Flags {
            operation: operation.to_string(),
            message: e.kind().to_string(),
        })
}

/// Builds the configuration from the flags the operation declares
///
/// Flags an operation does not declare keep their defaults.
fn build_configuration(
    spec: &OperationSpec,
    matches: &ArgMatches,
) -> Result<Configuration, UsageError> {
    let mut config = Configuration::new();

    if let Some(path) = value(spec, matches, &CONFIG_FLAG) {
        config.config_file = PathBuf::from(path);
    }

    if let Some(domain) = value(spec, matches, &DOMAIN_FLAG) {
        config.domain = Domain::new(domain.as_str())
            .ok_or_else(|| UsageError::InvalidDomain(domain.clone()))?;
    }

    if let Some(port) = value(spec, matches, &PORT_FLAG) {
        config.port = port.clone();
    }

    config.verbose = switch(spec, matches, &VERBOSE_FLAG);

    Ok(config)
}

// Clap panics on ids the command never declared, so check the grammar first.
fn value<'m>(spec: &OperationSpec, matches: &'m ArgMatches, flag: &FlagSpec) -> Option<&'m String> {
    if !spec.accepts(flag.name) {
        return None;
    }
    matches.get_one::<String>(flag.name)
}

fn switch(spec: &OperationSpec, matches: &ArgMatches, flag: &FlagSpec) -> bool {
    spec.accepts(flag.name) && matches.get_flag(flag.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;

    struct StaticLoader(Vec<Service>);

    impl ServiceLoader for StaticLoader {
        fn load(&self, _path: &Path) -> Result<Vec<Service>, RegistryError> {
            Ok(self.0.clone())
        }
    }

    struct MissingLoader;

    impl ServiceLoader for MissingLoader {
        fn load(&self, path: &Path) -> Result<Vec<Service>, RegistryError> {
            Err(RegistryError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            })
        }
    }

    fn matches_for(operation: Operation, tokens: &[&str]) -> ArgMatches {
        let spec = operation.spec();
        parse(spec.command(), tokens, spec.flags, operation.as_str()).unwrap()
    }

    #[test]
    fn test_parse_reports_unknown_flag() {
        let spec = Operation::Run.spec();
        let result = parse(spec.command(), &["-v"], spec.flags, "run");

        match result {
            Err(UsageError::Flags { operation, .. }) => assert_eq!(operation, "run"),
            other => panic!("Expected Flags error, got {:?}", other),
        }
    }

    #[test]
    fn test_value_ignores_undeclared_flags() {
        let url = Operation::Url.spec();
        let matches = matches_for(Operation::Url, &["web"]);

        assert_eq!(value(url, &matches, &CONFIG_FLAG), None);
        assert!(!switch(url, &matches, &VERBOSE_FLAG));
    }

    #[test]
    fn test_value_returns_default_when_absent() {
        let run = Operation::Run.spec();
        let matches = matches_for(Operation::Run, &[]);

        assert_eq!(value(run, &matches, &PORT_FLAG).map(String::as_str), Some("2000"));
        assert_eq!(value(run, &matches, &DOMAIN_FLAG).map(String::as_str), Some(".dev"));
        assert!(!switch(run, &matches, &VERBOSE_FLAG));
    }

    #[test]
    fn test_build_configuration_from_flags() {
        let run = Operation::Run.spec();
        let matches = matches_for(
            Operation::Run,
            &["-p", "3000", "-p", "4000", "-V", "-config", "team.ergo"],
        );

        let config = build_configuration(run, &matches).unwrap();
        assert_eq!(config.port, "4000");
        assert!(config.verbose);
        assert_eq!(config.config_file, PathBuf::from("team.ergo"));
        assert_eq!(config.domain.as_str(), ".dev");
    }

    #[test]
    fn test_build_configuration_rejects_domain_without_dot() {
        let list = Operation::List.spec();
        let matches = matches_for(Operation::List, &["-domain", "dev"]);

        assert_eq!(
            build_configuration(list, &matches),
            Err(UsageError::InvalidDomain("dev".to_string()))
        );
    }

    #[test]
    fn test_load_services_falls_back_to_empty() {
        let resolver = Resolver::new("1.2.3", MissingLoader);
        assert!(resolver.load_services(Path::new(".ergo")).is_empty());

        let resolver = Resolver::new(
            "1.2.3",
            StaticLoader(vec![Service::new("web", "localhost:3000")]),
        );
        assert_eq!(resolver.load_services(Path::new(".ergo")).len(), 1);
    }

    #[test]
    fn test_exact_arity_counts_raw_tokens() {
        let resolver = Resolver::new("1.2.3", StaticLoader(Vec::new()));

        for tokens in [vec!["--", "web"], vec!["web", "--"], vec![]] {
            assert!(
                matches!(
                    resolver.resolve_operation(Operation::Url, &tokens),
                    Err(UsageError::Arity { .. })
                ),
                "{:?} should be rejected",
                tokens
            );
        }
        assert!(matches!(
            resolver.resolve_operation(Operation::Url, &["web"]),
            Ok(Some(Action::Url { .. }))
        ));
        assert!(matches!(
            resolver.resolve_operation(Operation::Url, &["-h"]),
            Ok(None)
        ));
    }
}
