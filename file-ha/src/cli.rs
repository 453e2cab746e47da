use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::config::ClusterConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Two-replica file cluster with automatic failure recovery", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub limits: LimitArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Seed the four-host sample cluster, fail some hosts and print the result.
    Demo(DemoArgs),
    /// Read cluster commands from stdin.
    Shell(ShellArgs),
}

#[derive(Args, Debug, Clone)]
pub struct LimitArgs {
    /// JSON file with cluster limits. Flags below override its values.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Fewest active hosts the cluster may drop to.
    #[arg(long, global = true)]
    pub min_hosts: Option<usize>,

    /// Allowed file extensions, comma-separated. Replaces the default list.
    #[arg(long, global = true, value_delimiter = ',')]
    pub allow_ext: Vec<String>,
}

impl LimitArgs {
    /// Defaults, then the config file, then flags.
    pub fn resolve(&self) -> Result<ClusterConfig> {
        let mut config = match &self.config {
            Some(path) => ClusterConfig::load(path)?,
            None => ClusterConfig::default(),
        };
        if let Some(min_hosts) = self.min_hosts {
            config.min_hosts = min_hosts;
        }
        if !self.allow_ext.is_empty() {
            config.allowed_extensions = self.allow_ext.iter().cloned().collect();
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Args, Debug, Clone)]
pub struct DemoArgs {
    /// Seed for destination selection. Random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Hosts to fail, comma-separated.
    #[arg(long, value_delimiter = ',', default_value = "host2")]
    pub fail: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ShellArgs {
    /// Seed for destination selection. Random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
}
