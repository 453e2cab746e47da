//! Hard failures raised by the cluster controller.
//!
//! Each variant aborts the call that raised it before any state is touched.
//! Per-item problems during recovery (an unknown failed host, a file with no
//! surviving replica) are not errors; they are logged and skipped.

/// Validation failures returned by [`crate::cluster::ClusterController`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ClusterError {
    /// File name collides with the host name, or its extension is not allowed.
    #[error(
        "invalid file/host name `{name}`: file and host names must differ and the file extension must be one of the allowed list"
    )]
    InvalidName { name: String },

    /// The file already has its full set of replicas.
    #[error("file `{file}` already has {max} copies in the cluster; at most {max} copies can be maintained")]
    TooManyCopies { file: String, max: usize },

    /// The target host is not in the active host set.
    #[error("no host named `{host}` exists in the cluster")]
    HostNotFound { host: String },

    /// Not enough active hosts remain to keep two replicas of every file.
    #[error("at least {min} hosts must be present in the cluster to perform HA (have {available})")]
    TooFewHosts { min: usize, available: usize },

    /// More hosts were declared failed than one recovery call can handle.
    #[error("at most {max} hosts may fail at once (got {requested})")]
    TooManyFailedHosts { max: usize, requested: usize },
}
