//! Flag and argument grammar for every ergo operation
//!
//! The grammar is static data: which flags each operation accepts, their
//! defaults, and how many positional arguments it takes. The resolver builds
//! its `clap::Command`s from these tables so no operation is parsed ad hoc.
//!
//! Flags use single-dash spelling (`-config`, `-domain`, `-remove`). Clap
//! only knows `--long` flags, so multi-character flags are declared as longs
//! and [`normalize_flags`] rewrites `-name` to `--name` before parsing.

use clap::{Arg, ArgAction, Command};
use std::fmt;

use crate::config::{DEFAULT_CONFIG_FILE, DEFAULT_PORT};
use crate::types::DEFAULT_DOMAIN;

/// Clap id of the positional argument list
pub const POSITIONALS: &str = "args";

/// How a flag consumes input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// Boolean flag, set by its presence
    Switch,
    /// Flag that takes a value
    Value,
}

/// A single accepted flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagSpec {
    pub name: &'static str,
    pub kind: FlagKind,
    /// Default value; ignored for switches, which default to false
    pub default: &'static str,
    pub help: &'static str,
}

impl FlagSpec {
    const fn switch(name: &'static str, help: &'static str) -> Self {
        FlagSpec {
            name,
            kind: FlagKind::Switch,
            default: "false",
            help,
        }
    }

    const fn value(name: &'static str, default: &'static str, help: &'static str) -> Self {
        FlagSpec {
            name,
            kind: FlagKind::Value,
            default,
            help,
        }
    }

    /// Single-character flags are clap shorts, the rest are longs
    fn is_short(&self) -> bool {
        self.name.chars().count() == 1
    }

    /// Builds the clap argument for this flag
    pub fn to_arg(&self) -> Arg {
        let mut arg = Arg::new(self.name).help(self.help);

        arg = match self.name.chars().next() {
            Some(c) if self.is_short() => arg.short(c),
            _ => arg.long(self.name),
        };

        match self.kind {
            FlagKind::Switch => arg.action(ArgAction::SetTrue),
            FlagKind::Value => arg
                .action(ArgAction::Set)
                .num_args(1)
                .default_value(self.default),
        }
    }
}

pub const HELP_FLAG: FlagSpec = FlagSpec::switch("h", "Shows this message.");
pub const VERSION_FLAG: FlagSpec = FlagSpec::switch("v", "Shows ergo's version.");
pub const CONFIG_FLAG: FlagSpec =
    FlagSpec::value("config", DEFAULT_CONFIG_FILE, "Set the services file.");
pub const DOMAIN_FLAG: FlagSpec =
    FlagSpec::value("domain", DEFAULT_DOMAIN, "Set a custom domain for services.");
pub const PORT_FLAG: FlagSpec = FlagSpec::value("p", DEFAULT_PORT, "Set port to the proxy.");
pub const VERBOSE_FLAG: FlagSpec = FlagSpec::switch("V", "Set verbosity on proxy output.");
pub const REMOVE_FLAG: FlagSpec = FlagSpec::switch("remove", "Remove proxy configurations.");

/// Flags accepted before the operation token
pub const TOP_LEVEL_FLAGS: &[FlagSpec] = &[HELP_FLAG, VERSION_FLAG];

/// Number of positional arguments an operation accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "exactly {}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

/// The mutually exclusive top-level operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    ListNames,
    Setup,
    Url,
    Run,
    Add,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::List,
        Operation::ListNames,
        Operation::Setup,
        Operation::Url,
        Operation::Run,
        Operation::Add,
    ];

    /// Looks up an operation by its command-line token
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == token)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::ListNames => "list-names",
            Operation::Setup => "setup",
            Operation::Url => "url",
            Operation::Run => "run",
            Operation::Add => "add",
        }
    }

    /// Grammar entry for this operation
    pub fn spec(&self) -> &'static OperationSpec {
        match self {
            Operation::List => &LIST,
            Operation::ListNames => &LIST_NAMES,
            Operation::Setup => &SETUP,
            Operation::Url => &URL,
            Operation::Run => &RUN,
            Operation::Add => &ADD,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grammar of a single operation
#[derive(Debug)]
pub struct OperationSpec {
    pub operation: Operation,
    pub about: &'static str,
    pub flags: &'static [FlagSpec],
    /// Names of the positional arguments, for help output
    pub positionals: &'static [&'static str],
    pub arity: Arity,
}

impl OperationSpec {
    /// Whether this operation declares the flag `name`
    pub fn accepts(&self, name: &str) -> bool {
        self.flags.iter().any(|flag| flag.name == name)
    }

    /// Finds a declared flag by name
    pub fn flag(&self, name: &str) -> Option<&FlagSpec> {
        self.flags.iter().find(|flag| flag.name == name)
    }

    /// Builds the clap command that parses everything after the operation token
    pub fn command(&self) -> Command {
        let positionals = Arg::new(POSITIONALS)
            .value_names(self.positionals.iter().copied())
            .num_args(1..)
            .action(ArgAction::Append);

        Command::new(self.operation.as_str())
            .about(self.about)
            .no_binary_name(true)
            .args_override_self(true)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .args(self.flags.iter().map(FlagSpec::to_arg))
            .arg(positionals)
    }
}

static LIST: OperationSpec = OperationSpec {
    operation: Operation::List,
    about: "List all services with their proxied URLs.",
    flags: &[HELP_FLAG, CONFIG_FLAG, DOMAIN_FLAG],
    positionals: &[],
    arity: Arity::AtLeast(0),
};

static LIST_NAMES: OperationSpec = OperationSpec {
    operation: Operation::ListNames,
    about: "List the names of all services.",
    flags: &[HELP_FLAG, CONFIG_FLAG, DOMAIN_FLAG],
    positionals: &[],
    arity: Arity::AtLeast(0),
};

static SETUP: OperationSpec = OperationSpec {
    operation: Operation::Setup,
    about: "Register the proxy with the operating system.",
    flags: &[HELP_FLAG, REMOVE_FLAG, CONFIG_FLAG, DOMAIN_FLAG],
    positionals: &["system"],
    arity: Arity::AtLeast(1),
};

// `url` takes the service name and nothing else.
static URL: OperationSpec = OperationSpec {
    operation: Operation::Url,
    about: "Print the proxied URL of a service.",
    flags: &[HELP_FLAG],
    positionals: &["name"],
    arity: Arity::Exactly(1),
};

static RUN: OperationSpec = OperationSpec {
    operation: Operation::Run,
    about: "Start the proxy.",
    flags: &[HELP_FLAG, PORT_FLAG, VERBOSE_FLAG, CONFIG_FLAG, DOMAIN_FLAG],
    positionals: &[],
    arity: Arity::AtLeast(0),
};

static ADD: OperationSpec = OperationSpec {
    operation: Operation::Add,
    about: "Add a service to the registry.",
    flags: &[HELP_FLAG, CONFIG_FLAG],
    positionals: &["service-name", "host:port"],
    arity: Arity::AtLeast(2),
};

/// Builds the clap command for the flags that precede the operation token
///
/// Everything from the first token that is not a known top-level flag onward
/// is collected verbatim into [`POSITIONALS`].
pub fn top_level_command() -> Command {
    let rest = Arg::new(POSITIONALS)
        .num_args(1..)
        .trailing_var_arg(true)
        .allow_hyphen_values(true);

    Command::new("ergo")
        .args_override_self(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .args(TOP_LEVEL_FLAGS.iter().map(FlagSpec::to_arg))
        .arg(rest)
}

/// Rewrites single-dash long flags (`-config`, `-domain=.test`) to the
/// double-dash form clap expects
///
/// Only names declared in `flags` are rewritten. Tokens after `--` are left
/// untouched.
pub fn normalize_flags<S: AsRef<str>>(tokens: &[S], flags: &[FlagSpec]) -> Vec<String> {
    let mut normalized = Vec::with_capacity(tokens.len());
    let mut in_flags = true;

    for token in tokens {
        let token = token.as_ref();
        if token == "--" {
            in_flags = false;
        }

        let rewrite = in_flags
            && token
                .strip_prefix('-')
                .filter(|body| !body.starts_with('-'))
                .map(|body| body.split('=').next().unwrap_or(body))
                .is_some_and(|name| {
                    flags
                        .iter()
                        .any(|flag| !flag.is_short() && flag.name == name)
                });

        if rewrite {
            normalized.push(format!("-{}", token));
        } else {
            normalized.push(token.to_string());
        }
    }

    normalized
}
