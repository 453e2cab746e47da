//! The "copy this file to that host" collaborator.
//!
//! The controller calls [`FileTransfer::copy`] whenever a replica edge is
//! created. It does not look at the outcome; moving bytes is somebody else's
//! problem.

use tracing::debug;

pub trait FileTransfer {
    fn copy(&mut self, file: &str, host: &str);
}

/// Default transfer: logs the copy and does nothing else.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingTransfer;

impl FileTransfer for LoggingTransfer {
    fn copy(&mut self, file: &str, host: &str) {
        debug!(file = %file, host = %host, "copying file to host");
    }
}
