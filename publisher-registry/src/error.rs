//! Error surface shared by both discovery roles.

use crate::directory::DirectoryError;
use std::sync::Arc;
use thiserror::Error;

/// Optional callback receiving errors absorbed by a background watch loop.
///
/// Runs on the watch worker's task, on the critical path of the polling loop:
/// it must not block indefinitely and must not re-enter watch or stop
/// synchronously.
pub type ErrorHandler = Arc<dyn Fn(DiscoveryError) + Send + Sync>;

/// Error returned by discovery operations.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// No service in the namespace carries the derived service name.
    #[error("service does not exist: {service_name}")]
    ServiceDoesNotExist { service_name: String },

    /// Failure reported by the service directory, passed through unchanged.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}
