//! Two-replica file cluster with automatic failure recovery.
//!
//! Every file lives on exactly two hosts. When up to two hosts fail at once,
//! each file that lost a replica is copied from its surviving host to a
//! healthy host picked at random, and the moves are reported back as
//! [`record::HaAction`] values.
//!
//! # Modules
//!
//! - [`graph`]: undirected file/host adjacency sets
//! - [`cluster`]: host and file lifecycle plus the recovery algorithm
//! - [`selector`]: pluggable random destination choice
//! - [`transfer`]: the copy-file-to-host collaborator
//! - [`error`]: hard validation failures
//! - [`config`]: cluster limits and extension whitelist
//! - [`record`]: recovery result records
//! - [`protocol`] and [`shell`]: the interactive command shell
//! - [`cli`]: command-line arguments for the binary

pub mod cli;
pub mod cluster;
pub mod config;
pub mod error;
pub mod graph;
pub mod protocol;
pub mod record;
pub mod selector;
pub mod shell;
pub mod transfer;
