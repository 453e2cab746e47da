//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::collections::{BTreeSet, HashSet};

use file_ha::cluster::ClusterController;
use file_ha::config::ClusterConfig;
use file_ha::selector::{HostSelector, RandomSelector, SelectorError};
use file_ha::transfer::{FileTransfer, LoggingTransfer};

/// Remembers every copy request in call order.
#[derive(Debug, Default)]
pub struct RecordingTransfer {
    calls: Vec<(String, String)>,
}

impl RecordingTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[(String, String)] {
        &self.calls
    }
}

impl FileTransfer for RecordingTransfer {
    fn copy(&mut self, file: &str, host: &str) {
        self.calls.push((file.to_string(), host.to_string()));
    }
}

/// Always picks the last candidate. Candidates arrive in host-name order,
/// so the outcome of a recovery is fully predictable.
pub struct LastCandidate;

impl HostSelector for LastCandidate {
    fn choose<'a>(&mut self, candidates: &[&'a str]) -> Result<&'a str, SelectorError> {
        candidates
            .last()
            .copied()
            .ok_or(SelectorError::EmptyCandidateSet)
    }
}

pub fn seeded(seed: u64) -> ClusterController<RandomSelector, LoggingTransfer> {
    ClusterController::with_parts(
        ClusterConfig::default(),
        RandomSelector::seeded(seed),
        LoggingTransfer,
    )
}

/// Four hosts, five files:
///
/// file1 -> host1, host3
/// file2 -> host1, host2
/// file3 -> host2, host3
/// file4 -> host1, host3
/// file5 -> host1, host4
pub fn seed_reference<S: HostSelector, T: FileTransfer>(cluster: &mut ClusterController<S, T>) {
    for host in ["host1", "host2", "host3", "host4"] {
        cluster.add_host(host);
    }
    let placements = [
        ("file1", "host1"),
        ("file2", "host1"),
        ("file4", "host1"),
        ("file5", "host1"),
        ("file2", "host2"),
        ("file3", "host2"),
        ("file1", "host3"),
        ("file3", "host3"),
        ("file4", "host3"),
        ("file5", "host4"),
    ];
    for (file, host) in placements {
        cluster
            .add_file(file, host)
            .unwrap_or_else(|err| panic!("placing {file} on {host}: {err}"));
    }
}

pub fn reference_cluster(seed: u64) -> ClusterController<RandomSelector, LoggingTransfer> {
    let mut cluster = seeded(seed);
    seed_reference(&mut cluster);
    cluster
}

pub fn holders<S: HostSelector, T: FileTransfer>(
    cluster: &ClusterController<S, T>,
    file: &str,
) -> HashSet<String> {
    cluster.hosts_for_file(file).cloned().unwrap_or_default()
}

pub fn set(names: &[&str]) -> HashSet<String> {
    names.iter().map(|name| name.to_string()).collect()
}

pub fn host_set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|name| name.to_string()).collect()
}
