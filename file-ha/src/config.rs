//! Cluster-wide limits.
//!
//! The defaults match the numbers the fleet has always run with: three hosts
//! minimum, two simultaneous failures at most, and a short whitelist of file
//! extensions. Overrides come from a JSON file or from CLI flags.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_HOSTS: usize = 3;
pub const DEFAULT_MAX_FAILED_HOSTS: usize = 2;
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["txt", "jpg", "png", "html", "css"];

/// Every file is kept on exactly this many hosts.
pub const REPLICAS_PER_FILE: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Fewest active hosts the cluster may drop to.
    pub min_hosts: usize,
    /// Most distinct hosts a single recovery call may declare failed.
    pub max_failed_hosts: usize,
    /// Extensions (without the dot) accepted by `add_file`.
    pub allowed_extensions: BTreeSet<String>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            min_hosts: DEFAULT_MIN_HOSTS,
            max_failed_hosts: DEFAULT_MAX_FAILED_HOSTS,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

impl ClusterConfig {
    /// Reads a JSON config file. Missing fields fall back to the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.min_hosts > 0, "min_hosts must be at least 1");
        ensure!(
            self.max_failed_hosts < self.min_hosts,
            "max_failed_hosts ({}) must be below min_hosts ({})",
            self.max_failed_hosts,
            self.min_hosts
        );
        Ok(())
    }

    /// A name without a `.` counts as extensionless and is accepted.
    pub fn is_allowed_extension(&self, file: &str) -> bool {
        match file.rsplit_once('.') {
            Some((_, ext)) => self.allowed_extensions.contains(ext),
            None => true,
        }
    }
}
