//! Publisher registration lifecycle against the directory.

use crate::control_plane::naming::{instance_id_for_endpoint, service_name_for_event};
use crate::control_plane::service_resolution::resolve_service_id;
use crate::directory::{ServiceDirectory, INSTANCE_IPV4_ATTRIBUTE, INSTANCE_PORT_ATTRIBUTE};
use crate::error::DiscoveryError;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use tracing::debug;

const REGISTRATION_TAG: &str = "Registration:";

/// Withdraw handle returned by a successful registration.
///
/// Consuming [`deregister`](Self::deregister) issues exactly one delete for
/// the registered (instance, service) pair; taking `self` by value makes a
/// second attempt impossible.
pub struct Deregistration {
    directory: Arc<dyn ServiceDirectory>,
    service_id: String,
    instance_id: String,
}

impl Deregistration {
    /// Directory-side identifier of the instance this handle withdraws.
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Directory-side identifier of the service the instance lives under.
    pub fn service_id(&self) -> &str {
        &self.service_id
    }

    /// Withdraws the previously announced endpoint.
    pub async fn deregister(self) -> Result<(), DiscoveryError> {
        self.directory
            .deregister_instance(&self.service_id, &self.instance_id)
            .await?;

        debug!(
            "{} deregistered instance {} from service {}",
            REGISTRATION_TAG, self.instance_id, self.service_id
        );
        Ok(())
    }
}

impl Debug for Deregistration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deregistration")
            .field("service_id", &self.service_id)
            .field("instance_id", &self.instance_id)
            .finish_non_exhaustive()
    }
}

/// Announces `ipv4:port` as a publisher of the given event stream.
///
/// Resolves the stream's service identity, then issues a single register call
/// keyed by the deterministic instance id. Backend failures propagate
/// unchanged and leave nothing to undo.
pub(crate) async fn register_publisher(
    directory: &Arc<dyn ServiceDirectory>,
    namespace_id: &str,
    event_name: &str,
    event_version: u16,
    ipv4: &str,
    port: u16,
) -> Result<Deregistration, DiscoveryError> {
    let service_name = service_name_for_event(event_name, event_version);
    let service_id = resolve_service_id(directory.as_ref(), namespace_id, &service_name).await?;
    let instance_id = instance_id_for_endpoint(ipv4, port);

    let attributes = HashMap::from([
        (INSTANCE_IPV4_ATTRIBUTE.to_string(), ipv4.to_string()),
        (INSTANCE_PORT_ATTRIBUTE.to_string(), port.to_string()),
    ]);

    directory
        .register_instance(&service_id, &instance_id, attributes)
        .await?;

    debug!(
        "{} registered instance {} under service {}",
        REGISTRATION_TAG, instance_id, service_id
    );

    Ok(Deregistration {
        directory: Arc::clone(directory),
        service_id,
        instance_id,
    })
}
