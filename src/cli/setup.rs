//! `ergo setup <system> [-remove]`
//!
//! Builds the commands that point the system proxy settings at ergo's proxy
//! auto-config script (or clear them with `-remove`) and prints them for the
//! user to run. Changing OS settings needs privileges ergo does not assume.

use std::io::{self, Write};
use tracing::debug;

use crate::cli::common::finish;
use crate::config::Configuration;
use crate::error::ErgoError;
use crate::types::System;

const WINDOWS_INTERNET_SETTINGS: &str =
    r"HKCU\Software\Microsoft\Windows\CurrentVersion\Internet Settings";

/// Run the setup command
pub fn run_setup(system: &str, remove: bool, config: &Configuration) -> i32 {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    finish(write_setup(&mut out, system, remove, config))
}

/// Writes the setup commands for `system`
///
/// # Errors
///
/// Returns `ErgoError::UnknownSystem` if `system` is not a supported target.
pub fn write_setup<W: Write>(
    out: &mut W,
    system: &str,
    remove: bool,
    config: &Configuration,
) -> Result<(), ErgoError> {
    let system: System = system.parse().map_err(ErgoError::UnknownSystem)?;
    let commands = setup_commands(system, remove, &config.pac_url());
    debug!(%system, remove, count = commands.len(), "Rendered setup commands");

    if remove {
        writeln!(out, "To remove the ergo proxy configuration on {}, run:", system)?;
    } else {
        writeln!(out, "To configure the ergo proxy on {}, run:", system)?;
    }
    for command in &commands {
        writeln!(out, "  {}", command)?;
    }

    Ok(())
}

/// Commands that register (or remove) `pac_url` as the system proxy config
pub fn setup_commands(system: System, remove: bool, pac_url: &str) -> Vec<String> {
    match (system, remove) {
        (System::Osx, false) => vec![format!(
            r#"networksetup -setautoproxyurl "Wi-Fi" {}"#,
            pac_url
        )],
        (System::Osx, true) => {
            vec![r#"networksetup -setautoproxystate "Wi-Fi" off"#.to_string()]
        }
        (System::LinuxGnome, false) => vec![
            "gsettings set org.gnome.system.proxy mode 'auto'".to_string(),
            format!("gsettings set org.gnome.system.proxy autoconfig-url {}", pac_url),
        ],
        (System::LinuxGnome, true) => {
            vec!["gsettings set org.gnome.system.proxy mode 'none'".to_string()]
        }
        (System::Windows, false) => vec![format!(
            r#"reg add "{}" /v AutoConfigURL /t REG_SZ /d {} /f"#,
            WINDOWS_INTERNET_SETTINGS, pac_url
        )],
        (System::Windows, true) => vec![format!(
            r#"reg delete "{}" /v AutoConfigURL /f"#,
            WINDOWS_INTERNET_SETTINGS
        )],
    }
}
