//! Outward contract consumed by the message-bus layer.

use crate::control_plane::registration::Deregistration;
use crate::data_plane::watch_worker::WatchHandle;
use crate::endpoint::EndpointListener;
use crate::error::DiscoveryError;
use async_trait::async_trait;
use std::sync::Arc;

/// Publisher discovery surface shared by both roles.
///
/// The read-write role backs [`register`](Self::register) with the directory;
/// the read-only role answers `Ok(None)` because instance lifecycle in that
/// deployment is managed out-of-band. Watching behaves identically in both.
#[async_trait]
pub trait PublishersRegistry: Send + Sync {
    /// Announces a local publisher endpoint for one event stream.
    ///
    /// Returns a withdraw handle when the role supports announcing, `None`
    /// when it does not. Callers must not assume the capability exists.
    async fn register(
        &self,
        event_name: &str,
        event_version: u16,
        ipv4: &str,
        port: u16,
    ) -> Result<Option<Deregistration>, DiscoveryError>;

    /// Starts watching the publisher set for one event stream.
    ///
    /// The listener receives the full current snapshot on an immediate first
    /// tick and again at every polling interval until the returned handle is
    /// stopped.
    async fn watch(
        &self,
        event_name: &str,
        event_version: u16,
        listener: Arc<dyn EndpointListener>,
    ) -> Result<WatchHandle, DiscoveryError>;
}
