//! `ergo list` and `ergo list-names`
//!
//! `list` prints every registered service with the URL it is proxied under;
//! `list-names` prints only the names, one per line, for scripting.

use std::io::{self, IsTerminal, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::cli::common::finish;
use crate::config::Configuration;

/// Run the list command
pub fn run_list(config: &Configuration) -> i32 {
    let choice = if io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut out = StandardStream::stdout(choice);
    finish(write_list(&mut out, config).map_err(Into::into))
}

/// Run the list-names command
pub fn run_list_names(config: &Configuration) -> i32 {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    finish(write_names(&mut out, config).map_err(Into::into))
}

/// Writes the service listing
pub fn write_list<W: WriteColor>(out: &mut W, config: &Configuration) -> io::Result<()> {
    writeln!(out, "Ergo Proxy current list:")?;

    let mut url_color = ColorSpec::new();
    url_color.set_fg(Some(Color::Cyan)).set_bold(true);

    for service in &config.services {
        write!(out, "  - ")?;
        out.set_color(&url_color)?;
        write!(out, "{}", service.url(&config.domain))?;
        out.reset()?;
        writeln!(out, " -> {}", service.target())?;
    }

    Ok(())
}

/// Writes one service name per line
pub fn write_names<W: Write>(out: &mut W, config: &Configuration) -> io::Result<()> {
    for service in &config.services {
        writeln!(out, "{}", service.name())?;
    }
    Ok(())
}
