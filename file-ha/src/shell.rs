//! Line-oriented shell over a single cluster.
//!
//! [`run`] reads commands from any `BufRead` and writes replies to any
//! `Write`, so the binary hands it stdin/stdout and tests hand it buffers.
//! A bad command prints an `ERROR:` line and the loop keeps going.

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::cluster::ClusterController;
use crate::protocol::{ConsoleCommand, HELP_TEXT};
use crate::selector::HostSelector;
use crate::transfer::FileTransfer;

#[derive(Debug, PartialEq)]
pub enum Outcome {
    Continue(Vec<String>),
    Exit,
}

/// Applies one command to the cluster and returns the lines to print.
pub fn execute<S: HostSelector, T: FileTransfer>(
    cluster: &mut ClusterController<S, T>,
    command: ConsoleCommand,
) -> Result<Outcome> {
    let lines = match command {
        ConsoleCommand::Host { name } => {
            cluster.add_host(&name);
            vec![format!("host {name} added")]
        }
        ConsoleCommand::File { file, host } => {
            cluster.add_file(&file, &host)?;
            vec![format!("{file} placed on {host}")]
        }
        ConsoleCommand::Remove { host } => {
            cluster.remove_host(&host);
            vec![format!("host {host} removed from graph")]
        }
        ConsoleCommand::Fail { hosts } => {
            let actions = cluster.perform_ha(&hosts)?;
            if actions.is_empty() {
                vec!["no files re-replicated".to_string()]
            } else {
                actions.iter().map(ToString::to_string).collect()
            }
        }
        ConsoleCommand::Hosts => vec![
            cluster
                .hosts()
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" "),
        ],
        ConsoleCommand::Where { file } => match cluster.hosts_for_file(&file) {
            Some(holders) => {
                let mut holders: Vec<&str> = holders.iter().map(String::as_str).collect();
                holders.sort_unstable();
                vec![format!("{file}: {}", holders.join(" "))]
            }
            None => vec![format!("{file}: not found")],
        },
        ConsoleCommand::Graph => cluster.to_string().lines().map(str::to_string).collect(),
        ConsoleCommand::Reset => {
            cluster.delete_cluster();
            vec!["cluster cleared".to_string()]
        }
        ConsoleCommand::Help => HELP_TEXT.lines().map(str::to_string).collect(),
        ConsoleCommand::Exit => return Ok(Outcome::Exit),
    };
    Ok(Outcome::Continue(lines))
}

/// Runs the shell until `EXIT` or end of input.
pub fn run<S, T, R, W>(
    cluster: &mut ClusterController<S, T>,
    input: R,
    mut output: W,
) -> Result<()>
where
    S: HostSelector,
    T: FileTransfer,
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let result = ConsoleCommand::parse(&line).and_then(|command| execute(cluster, command));
        match result {
            Ok(Outcome::Continue(lines)) => {
                for line in lines {
                    writeln!(output, "{line}")?;
                }
            }
            Ok(Outcome::Exit) => break,
            Err(err) => writeln!(output, "ERROR: {err}")?,
        }
        output.flush()?;
    }
    Ok(())
}
