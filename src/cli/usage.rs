//! Static usage text

/// Printed whenever arguments do not resolve to an action
pub const USAGE: &str = r#"
Ergo proxy.
The local proxy agent for multiple services development.

Usage:
  ergo run [options]
  ergo list [options]
  ergo list-names [options]
  ergo url <name>
  ergo setup [linux-gnome|osx|windows] [-remove] [options]
  ergo add <service-name> <host:port> [-config <file>]

Options:
  -h          Shows this message.
  -v          Shows ergo's version.
  -config     Set the config file to the proxy.
  -domain     Set a custom domain for services.

run:
  -p          Set ports to proxy.
  -V          Set verbosity on output.

setup:
  -remove     Set remove proxy configurations.
"#;

/// Writes the usage text to stdout
pub fn print_usage() {
    println!("{}", USAGE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::grammar::Operation;

    #[test]
    fn test_usage_mentions_every_operation() {
        for op in Operation::ALL {
            assert!(
                USAGE.contains(&format!("ergo {}", op.as_str())),
                "usage is missing {}",
                op
            );
        }
    }

    #[test]
    fn test_usage_mentions_every_flag() {
        for op in Operation::ALL {
            for flag in op.spec().flags {
                assert!(
                    USAGE.contains(&format!("-{}", flag.name)),
                    "usage is missing -{}",
                    flag.name
                );
            }
        }
    }
}
