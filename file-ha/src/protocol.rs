//! Command parsing for the interactive shell.
//!
//! Turns lines like `FILE notes.txt host1` into [`ConsoleCommand`] values.
//! Running them against a cluster is [`crate::shell`]'s job.

use anyhow::{Result, anyhow};

/// Commands accepted at the shell prompt.
#[derive(Debug, PartialEq)]
pub enum ConsoleCommand {
    Host { name: String },
    File { file: String, host: String },
    Remove { host: String },
    Fail { hosts: Vec<String> },
    Hosts,
    Where { file: String },
    Graph,
    Reset,
    Help,
    Exit,
}

pub const HELP_TEXT: &str = "\
Commands (case-insensitive, alias in brackets):
  HOST <name>          [a]  add an active host
  FILE <file> <host>   [f]  place a replica of <file> on <host>
  REMOVE <host>        [r]  drop a host vertex and its replicas
  FAIL <host> [host]   [x]  declare hosts failed and re-replicate
  HOSTS                [l]  list active hosts
  WHERE <file>         [w]  list hosts holding <file>
  GRAPH                [g]  print the replication graph
  RESET                     forget every host and file
  HELP                 [h]  show this text
  EXIT                 [e]  leave the shell";

impl ConsoleCommand {
    /// Parses one line of shell input.
    ///
    /// Names are kept exactly as typed; only the command word is
    /// case-folded and alias-expanded.
    pub fn parse(line: &str) -> Result<Self> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(first) = parts.first() else {
            return Err(anyhow!("empty command"));
        };

        let cmd = first.to_uppercase();
        let normalized_cmd = match cmd.as_str() {
            "A" => "HOST",
            "F" => "FILE",
            "R" => "REMOVE",
            "X" => "FAIL",
            "L" => "HOSTS",
            "W" => "WHERE",
            "G" => "GRAPH",
            "H" => "HELP",
            "E" => "EXIT",
            other => other,
        };

        match normalized_cmd {
            "HOSTS" => return Ok(ConsoleCommand::Hosts),
            "GRAPH" => return Ok(ConsoleCommand::Graph),
            "RESET" => return Ok(ConsoleCommand::Reset),
            "HELP" => return Ok(ConsoleCommand::Help),
            "EXIT" => return Ok(ConsoleCommand::Exit),
            _ => {}
        }

        match (normalized_cmd, parts.len()) {
            ("HOST", 2) => Ok(ConsoleCommand::Host {
                name: parts[1].to_string(),
            }),
            ("FILE", 3) => Ok(ConsoleCommand::File {
                file: parts[1].to_string(),
                host: parts[2].to_string(),
            }),
            ("REMOVE", 2) => Ok(ConsoleCommand::Remove {
                host: parts[1].to_string(),
            }),
            ("FAIL", n) if n >= 2 => Ok(ConsoleCommand::Fail {
                hosts: parts[1..].iter().map(|host| host.to_string()).collect(),
            }),
            ("WHERE", 2) => Ok(ConsoleCommand::Where {
                file: parts[1].to_string(),
            }),
            ("HOST", _) => Err(anyhow!("HOST requires exactly one argument: HOST <name>")),
            ("FILE", _) => Err(anyhow!(
                "FILE requires exactly two arguments: FILE <file> <host>"
            )),
            ("REMOVE", _) => Err(anyhow!("REMOVE requires exactly one argument: REMOVE <host>")),
            ("FAIL", _) => Err(anyhow!("FAIL requires at least one host: FAIL <host> [host]")),
            ("WHERE", _) => Err(anyhow!("WHERE requires exactly one argument: WHERE <file>")),
            _ => Err(anyhow!("invalid command. Try HELP/h for the list")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_commands() {
        assert!(matches!(ConsoleCommand::parse("exit"), Ok(ConsoleCommand::Exit)));
        assert!(matches!(ConsoleCommand::parse("EXIT"), Ok(ConsoleCommand::Exit)));
        assert!(matches!(ConsoleCommand::parse("Hosts"), Ok(ConsoleCommand::Hosts)));
        assert!(matches!(ConsoleCommand::parse("graph"), Ok(ConsoleCommand::Graph)));
        assert!(matches!(ConsoleCommand::parse("reset"), Ok(ConsoleCommand::Reset)));
    }

    #[test]
    fn test_aliases() {
        assert!(matches!(ConsoleCommand::parse("e"), Ok(ConsoleCommand::Exit)));
        assert!(matches!(ConsoleCommand::parse("h"), Ok(ConsoleCommand::Help)));
        assert!(matches!(ConsoleCommand::parse("l"), Ok(ConsoleCommand::Hosts)));
        assert!(matches!(
            ConsoleCommand::parse("a host1"),
            Ok(ConsoleCommand::Host { name }) if name == "host1"
        ));
        assert!(matches!(
            ConsoleCommand::parse("F notes.txt host1"),
            Ok(ConsoleCommand::File { file, host }) if file == "notes.txt" && host == "host1"
        ));
        assert!(matches!(
            ConsoleCommand::parse("w notes.txt"),
            Ok(ConsoleCommand::Where { file }) if file == "notes.txt"
        ));
        assert!(matches!(
            ConsoleCommand::parse("r host3"),
            Ok(ConsoleCommand::Remove { host }) if host == "host3"
        ));
    }

    #[test]
    fn test_names_keep_their_case() {
        assert_eq!(
            ConsoleCommand::parse("host HostA").ok(),
            Some(ConsoleCommand::Host {
                name: "HostA".to_string()
            })
        );
    }

    #[test]
    fn test_fail_takes_one_or_more_hosts() {
        assert_eq!(
            ConsoleCommand::parse("fail host2").ok(),
            Some(ConsoleCommand::Fail {
                hosts: vec!["host2".to_string()]
            })
        );
        assert_eq!(
            ConsoleCommand::parse("x host2 host10 host3").ok(),
            Some(ConsoleCommand::Fail {
                hosts: vec!["host2".into(), "host10".into(), "host3".into()]
            })
        );
        assert!(ConsoleCommand::parse("FAIL").is_err());
    }

    #[test]
    fn test_invalid_commands() {
        assert!(ConsoleCommand::parse("").is_err());
        assert!(ConsoleCommand::parse("   ").is_err());
        assert!(ConsoleCommand::parse("INVALID").is_err());
        assert!(ConsoleCommand::parse("HOST").is_err());
        assert!(ConsoleCommand::parse("FILE notes.txt").is_err());
        assert!(ConsoleCommand::parse("WHERE").is_err());
        assert!(ConsoleCommand::parse("REMOVE a b").is_err());
    }
}
