//! ergo CLI entry point

use ergo::cli::{Resolution, Resolver, print_usage};
use std::ffi::OsString;
use std::process;

/// Version reported by `ergo -v`
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    ergo::logging::init_logger();

    let args = match std::env::args_os()
        .map(OsString::into_string)
        .collect::<Result<Vec<String>, _>>()
    {
        Ok(args) => args,
        Err(arg) => {
            tracing::debug!(?arg, "Argument is not valid UTF-8");
            print_usage();
            return;
        }
    };

    let resolver = Resolver::with_file_registry(VERSION);

    match resolver.resolve(&args) {
        Resolution::Resolved(action) => process::exit(action.execute()),
        Resolution::HelpRequested => print_usage(),
        Resolution::Invalid(reason) => {
            tracing::debug!(%reason, "Arguments did not resolve to an operation");
            print_usage();
        }
    }
}
