use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// One completed re-replication: `file` was copied from `source_host` to
/// `destination_host` because its other replica was on a failed host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HaAction {
    pub file: String,
    pub source_host: String,
    pub destination_host: String,
}

impl HaAction {
    /// Encodes the record as a single JSON line (no trailing newline).
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for HaAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} -> {}",
            self.file, self.source_host, self.destination_host
        )
    }
}
