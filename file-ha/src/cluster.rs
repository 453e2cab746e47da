//! Cluster state and failure recovery.
//!
//! [`ClusterController`] owns the active host set, the set of known files
//! and the [`ReplicationGraph`] that ties them together. It is an ordinary
//! value: construct one, pass it around by `&mut`, build as many as you like
//! (tests usually build one per case).
//!
//! The controller is not synchronized. A caller that shares it between
//! threads has to wrap it in its own lock.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use tracing::{debug, info, warn};

use crate::config::{ClusterConfig, REPLICAS_PER_FILE};
use crate::error::ClusterError;
use crate::graph::ReplicationGraph;
use crate::record::HaAction;
use crate::selector::{HostSelector, RandomSelector};
use crate::transfer::{FileTransfer, LoggingTransfer};

/// Keeps two replicas of every file across a pool of hosts.
///
/// # Why BTreeSet for hosts?
///
/// Destination candidates are built by walking the active host set. With a
/// `HashSet` that walk is in a different order for every process, so even a
/// seeded selector would pick different hosts from run to run. A `BTreeSet`
/// keeps the walk stable and the seeded outcome reproducible.
pub struct ClusterController<S = RandomSelector, T = LoggingTransfer> {
    config: ClusterConfig,
    hosts: BTreeSet<String>,
    files: BTreeSet<String>,
    graph: ReplicationGraph,
    selector: S,
    transfer: T,
}

impl ClusterController {
    /// Default limits, entropy-seeded selection, logging-only transfer.
    pub fn new() -> Self {
        Self::with_parts(
            ClusterConfig::default(),
            RandomSelector::from_entropy(),
            LoggingTransfer,
        )
    }
}

impl Default for ClusterController {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: HostSelector, T: FileTransfer> ClusterController<S, T> {
    /// Builds a controller from explicit limits and collaborators.
    pub fn with_parts(config: ClusterConfig, selector: S, transfer: T) -> Self {
        Self {
            config,
            hosts: BTreeSet::new(),
            files: BTreeSet::new(),
            graph: ReplicationGraph::new(),
            selector,
            transfer,
        }
    }

    /// Marks `name` as an active host. Adding it twice changes nothing.
    pub fn add_host(&mut self, name: &str) {
        self.hosts.insert(name.to_string());
        self.graph.add_node(name);
    }

    /// Administrative removal: drops the host vertex and its edges.
    ///
    /// The active host set is left alone; only recovery takes hosts out of it.
    pub fn remove_host(&mut self, name: &str) {
        if self.graph.has_node(name) {
            self.graph.remove_node(name);
        }
    }

    /// Places one replica of `file` on `host`.
    ///
    /// Checks run in a fixed order and the first failure wins. Nothing is
    /// mutated unless every check passes.
    pub fn add_file(&mut self, file: &str, host: &str) -> Result<(), ClusterError> {
        if self
            .graph
            .neighbors(file)
            .is_some_and(|holders| holders.len() >= REPLICAS_PER_FILE)
        {
            debug!(file = %file, "rejecting add: file already fully replicated");
            return Err(ClusterError::TooManyCopies {
                file: file.to_string(),
                max: REPLICAS_PER_FILE,
            });
        }

        if file == host || !self.config.is_allowed_extension(file) {
            debug!(file = %file, host = %host, "rejecting add: invalid name");
            return Err(ClusterError::InvalidName {
                name: file.to_string(),
            });
        }

        if !self.hosts.contains(host) {
            debug!(file = %file, host = %host, "rejecting add: unknown host");
            return Err(ClusterError::HostNotFound {
                host: host.to_string(),
            });
        }

        if self.hosts.len() < self.config.min_hosts {
            debug!(available = self.hosts.len(), "rejecting add: too few hosts");
            return Err(ClusterError::TooFewHosts {
                min: self.config.min_hosts,
                available: self.hosts.len(),
            });
        }

        self.files.insert(file.to_string());
        self.graph.add_edge(file, host);
        self.transfer.copy(file, host);
        Ok(())
    }

    /// Re-replicates every file that lost a replica on one of `failed_hosts`.
    ///
    /// # Hard failures
    ///
    /// More than `max_failed_hosts` distinct names, or a batch of known hosts
    /// that would leave fewer than `min_hosts` active, aborts the whole call
    /// before anything changes.
    ///
    /// # Soft failures
    ///
    /// A name that is not a host vertex is logged and skipped. A file whose
    /// every replica sits on a failed host is logged as lost and skipped. In
    /// both cases recovery carries on with the rest of the batch.
    ///
    /// # Ordering
    ///
    /// Failed hosts are processed in input order, so records for the first
    /// host come before records for the second. The order of records for
    /// files on the same host is not part of the contract.
    pub fn perform_ha<H: AsRef<str>>(
        &mut self,
        failed_hosts: &[H],
    ) -> Result<Vec<HaAction>, ClusterError> {
        let mut order: Vec<&str> = Vec::with_capacity(failed_hosts.len());
        let mut failed: HashSet<&str> = HashSet::with_capacity(failed_hosts.len());
        for host in failed_hosts.iter().map(|host| host.as_ref()) {
            if failed.insert(host) {
                order.push(host);
            }
        }

        if failed.len() > self.config.max_failed_hosts {
            return Err(ClusterError::TooManyFailedHosts {
                max: self.config.max_failed_hosts,
                requested: failed.len(),
            });
        }

        if failed.iter().all(|host| self.hosts.contains(*host)) {
            let available = self.hosts.len() - failed.len();
            if available < self.config.min_hosts {
                return Err(ClusterError::TooFewHosts {
                    min: self.config.min_hosts,
                    available,
                });
            }
        }

        // Failed hosts leave the candidate pool before any file moves.
        let was_active: HashSet<&str> = order
            .iter()
            .copied()
            .filter(|host| self.hosts.remove(*host))
            .collect();

        let mut actions = Vec::new();
        for failed_host in order {
            let file_only =
                self.files.contains(failed_host) && !was_active.contains(failed_host);
            if !self.graph.has_node(failed_host) || file_only {
                warn!(host = %failed_host, "no host with this name in the cluster, skipping HA");
                continue;
            }
            self.recover_host(failed_host, &failed, &mut actions);
            self.graph.remove_node(failed_host);
        }

        Ok(actions)
    }

    fn recover_host(
        &mut self,
        failed_host: &str,
        failed: &HashSet<&str>,
        actions: &mut Vec<HaAction>,
    ) {
        let mut files_on_host: Vec<String> = match self.graph.neighbors(failed_host) {
            Some(neighbors) => neighbors
                .iter()
                .filter(|neighbor| self.files.contains(*neighbor))
                .cloned()
                .collect(),
            None => return,
        };
        // Sorted so a seeded selector replays the same choices.
        files_on_host.sort_unstable();

        for file in files_on_host {
            let holders = self
                .graph
                .neighbors_excluding(&file, failed_host)
                .unwrap_or_default();

            let Some(source) = holders
                .into_iter()
                .find(|holder| !failed.contains(holder.as_str()))
            else {
                warn!(file = %file, "every host holding this file has failed, file is lost");
                continue;
            };

            let candidates: Vec<&str> = self
                .hosts
                .iter()
                .map(String::as_str)
                .filter(|host| *host != source)
                .collect();
            let destination = match self.selector.choose(&candidates) {
                Ok(host) => host.to_string(),
                Err(err) => {
                    warn!(
                        file = %file,
                        source = %source,
                        error = %err,
                        "no destination available, skipping file"
                    );
                    continue;
                }
            };

            self.graph.add_edge(&file, &destination);
            self.transfer.copy(&file, &destination);
            info!(file = %file, source = %source, destination = %destination, "re-replicated file");

            actions.push(HaAction {
                file,
                source_host: source,
                destination_host: destination,
            });
        }
    }

    /// Forgets every host, file and replica.
    pub fn delete_cluster(&mut self) {
        self.graph.clear();
        self.hosts.clear();
        self.files.clear();
    }

    /// Active hosts, the only valid replica targets.
    pub fn hosts(&self) -> &BTreeSet<String> {
        &self.hosts
    }

    /// Hosts currently holding `file`, or `None` if the graph has never seen it.
    ///
    /// Iteration order of the returned set is unspecified.
    pub fn hosts_for_file(&self, file: &str) -> Option<&HashSet<String>> {
        self.graph.neighbors(file)
    }

    /// Every file ever added, including ones that have since been lost.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(String::as_str)
    }

    /// Known files with no replica left anywhere.
    pub fn lost_files(&self) -> Vec<&str> {
        self.files
            .iter()
            .filter(|file| self.graph.neighbors(file).map_or(true, HashSet::is_empty))
            .map(String::as_str)
            .collect()
    }

    /// Read-only view of the file/host adjacency.
    pub fn graph(&self) -> &ReplicationGraph {
        &self.graph
    }

    /// Limits this controller validates against.
    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// The copy collaborator, mostly for inspecting test doubles.
    pub fn transfer(&self) -> &T {
        &self.transfer
    }
}

impl<S, T> fmt::Display for ClusterController<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.graph, f)
    }
}
