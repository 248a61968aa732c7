//! `ergo url <name>`

use std::io::{self, Write};

use crate::cli::common::finish;
use crate::config::Configuration;
use crate::error::ErgoError;

/// Run the url command
pub fn run_url(name: &str, config: &Configuration) -> i32 {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    finish(write_url(&mut out, name, config))
}

/// Writes the proxied URL of the service called `name`
///
/// # Errors
///
/// Returns `ErgoError::ServiceNotFound` if no such service is registered.
pub fn write_url<W: Write>(out: &mut W, name: &str, config: &Configuration) -> Result<(), ErgoError> {
    let service = config
        .find_service(name)
        .ok_or_else(|| ErgoError::ServiceNotFound(name.to_string()))?;

    writeln!(out, "{}", service.url(&config.domain))?;
    Ok(())
}
