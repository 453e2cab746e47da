//! Undirected adjacency bookkeeping for the replication graph.
//!
//! The graph holds two disjoint kinds of vertex, files and hosts, but it
//! never looks at which is which. An edge `(file, host)` means "this host
//! stores a replica of this file". Telling the two kinds apart is the job of
//! [`crate::cluster::ClusterController`], which keeps its own name sets.

use std::collections::{HashMap, HashSet};
use std::fmt;

/// Adjacency-set graph keyed by vertex label.
///
/// # Why sets instead of lists?
///
/// Recovery asks "is this edge there?" and "who else holds this file?" far
/// more often than it walks neighbors in order. A `HashSet` makes both O(1)
/// and makes repeated `add_edge` calls naturally idempotent.
///
/// Neighbor iteration order is unspecified. Callers must not depend on it.
#[derive(Debug, Default, Clone)]
pub struct ReplicationGraph {
    adjacency: HashMap<String, HashSet<String>>,
}

impl ReplicationGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            adjacency: HashMap::new(),
        }
    }

    /// Inserts a vertex with no neighbors. Does nothing if it already exists.
    pub fn add_node(&mut self, label: &str) {
        if !self.adjacency.contains_key(label) {
            self.adjacency.insert(label.to_string(), HashSet::new());
        }
    }

    /// Connects `a` and `b` in both directions, creating either vertex if
    /// needed. Adding an edge that is already present is a no-op.
    pub fn add_edge(&mut self, a: &str, b: &str) {
        self.add_node(a);
        self.add_node(b);

        if let Some(neighbors) = self.adjacency.get_mut(a) {
            neighbors.insert(b.to_string());
        }
        if let Some(neighbors) = self.adjacency.get_mut(b) {
            neighbors.insert(a.to_string());
        }
    }

    /// Returns true if `label` is a vertex, with or without edges.
    pub fn has_node(&self, label: &str) -> bool {
        self.adjacency.contains_key(label)
    }

    /// Returns true only when the edge is recorded on both endpoints.
    ///
    /// A one-sided entry would mean the graph is corrupt, so it is reported
    /// as "no edge" rather than trusted.
    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        match (self.adjacency.get(a), self.adjacency.get(b)) {
            (Some(from_a), Some(from_b)) => from_a.contains(b) && from_b.contains(a),
            _ => false,
        }
    }

    /// Returns the neighbors of `label`, or `None` if the vertex is unknown.
    pub fn neighbors(&self, label: &str) -> Option<&HashSet<String>> {
        self.adjacency.get(label)
    }

    /// Returns the neighbors of `label` with `excluded` filtered out.
    ///
    /// Filtering a name that is not a neighbor leaves the set unchanged.
    /// Returns `None` only when `label` itself is unknown.
    pub fn neighbors_excluding(&self, label: &str, excluded: &str) -> Option<HashSet<String>> {
        self.adjacency.get(label).map(|neighbors| {
            neighbors
                .iter()
                .filter(|neighbor| neighbor.as_str() != excluded)
                .cloned()
                .collect()
        })
    }

    /// Removes `label` and every edge touching it.
    ///
    /// Neighbors are detached first so no adjacency set is left pointing at
    /// a vertex that no longer exists. Unknown labels are ignored.
    pub fn remove_node(&mut self, label: &str) {
        let Some(neighbors) = self.adjacency.remove(label) else {
            return;
        };

        for neighbor in &neighbors {
            if let Some(back_edges) = self.adjacency.get_mut(neighbor) {
                back_edges.remove(label);
            }
        }
    }

    /// Number of vertices, files and hosts together.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Drops every vertex and edge.
    pub fn clear(&mut self) {
        self.adjacency.clear();
    }
}

/// Renders one line per vertex, `label => a | b | `.
///
/// Vertices and neighbors are sorted so that output is stable between runs,
/// even though the underlying sets are not ordered.
impl fmt::Display for ReplicationGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut labels: Vec<&String> = self.adjacency.keys().collect();
        labels.sort();

        for label in labels {
            write!(f, "{label} => ")?;
            let mut neighbors: Vec<&String> = self.adjacency[label].iter().collect();
            neighbors.sort();
            for neighbor in neighbors {
                write!(f, "{neighbor} | ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
