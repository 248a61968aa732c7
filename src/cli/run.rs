//! `ergo run`
//!
//! Renders what the proxy would serve: the routing table and, with `-V`, the
//! proxy auto-config script. Serving traffic is not part of this build, so
//! the command always ends with `ErgoError::ProxyUnavailable`.

use std::io::{self, Write};
use tracing::info;

use crate::cli::common::finish;
use crate::config::Configuration;
use crate::error::ErgoError;

/// Run the proxy command
pub fn run_proxy(config: &Configuration) -> i32 {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    finish(write_run(&mut out, config))
}

/// Writes the routing table (and PAC script when verbose)
///
/// # Errors
///
/// Returns `ErgoError::ProxyUnavailable` once the routing information has
/// been written, or `ErgoError::Io` if writing fails.
pub fn write_run<W: Write>(out: &mut W, config: &Configuration) -> Result<(), ErgoError> {
    info!(
        port = %config.port,
        domain = %config.domain,
        services = config.services.len(),
        "Preparing proxy"
    );

    writeln!(out, "Ergo Proxy routes on port {}:", config.port)?;
    for service in &config.services {
        writeln!(out, "  - {} -> {}", service.url(&config.domain), service.target())?;
    }

    if config.verbose {
        writeln!(out)?;
        writeln!(out, "Proxy auto-config ({}):", config.pac_url())?;
        writeln!(out, "{}", pac_script(config))?;
    }

    Err(ErgoError::ProxyUnavailable {
        port: config.port.clone(),
    })
}

/// Proxy auto-config script sending the configured domain through ergo
pub fn pac_script(config: &Configuration) -> String {
    format!(
        "function FindProxyForURL (url, host) {{\n  if (dnsDomainIs(host, '{}')) {{\n    return 'PROXY 127.0.0.1:{}';\n  }}\n  return 'DIRECT';\n}}",
        config.domain, config.port
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Domain, Service};

    #[test]
    fn test_pac_script() {
        let mut config = Configuration::new();
        config.domain = Domain::new(".test").unwrap();
        config.port = "3000".to_string();

        let script = pac_script(&config);
        assert!(script.starts_with("function FindProxyForURL (url, host) {"));
        assert!(script.contains("dnsDomainIs(host, '.test')"));
        assert!(script.contains("return 'PROXY 127.0.0.1:3000';"));
        assert!(script.ends_with("return 'DIRECT';\n}"));
    }

    #[test]
    fn test_write_run_lists_routes() {
        let mut config = Configuration::new();
        config.services = vec![Service::new("web", "localhost:3000")];

        let mut output = Vec::new();
        let result = write_run(&mut output, &config);

        assert!(matches!(result, Err(ErgoError::ProxyUnavailable { port }) if port == "2000"));
        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("Ergo Proxy routes on port 2000:\n"));
        assert!(output.contains("  - http://web.dev -> localhost:3000\n"));
        assert!(!output.contains("FindProxyForURL"));
    }

    #[test]
    fn test_write_run_verbose_prints_pac() {
        let mut config = Configuration::new();
        config.verbose = true;

        let mut output = Vec::new();
        let _ = write_run(&mut output, &config);

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Proxy auto-config (http://127.0.0.1:2000/proxy.pac):"));
        assert!(output.contains("FindProxyForURL"));
    }
}
