/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

use crate::control_plane::naming::service_name_for_event;
use crate::control_plane::registration::Deregistration;
use crate::control_plane::service_resolution::resolve_service_id;
use crate::data_plane::watch_worker::{
    spawn_endpoint_poll_loop, WatchHandle, DEFAULT_POLL_INTERVAL,
};
use crate::directory::ServiceDirectory;
use crate::endpoint::EndpointListener;
use crate::error::{DiscoveryError, ErrorHandler};
use crate::publishers_registry::PublishersRegistry;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const CLIENT_TAG: &str = "Client:";
const CLIENT_FN_NEW_TAG: &str = "new():";
const CLIENT_FN_WATCH_TAG: &str = "watch():";

/// Read-only discovery role: watches the publisher set of event streams.
///
/// Registration is structurally unsupported in this role; publisher
/// instances are provisioned out-of-band through declarative infrastructure
/// templates, so announcing is a no-op with no withdraw handle.
pub struct Client {
    namespace_id: String,
    directory: Arc<dyn ServiceDirectory>,
    error_handler: Option<ErrorHandler>,
    poll_interval: Duration,
}

impl Client {
    pub fn new(
        directory: Arc<dyn ServiceDirectory>,
        namespace_id: &str,
        error_handler: Option<ErrorHandler>,
    ) -> Self {
        debug!(
            "{}{} created for namespace {}",
            CLIENT_TAG, CLIENT_FN_NEW_TAG, namespace_id
        );

        Self {
            namespace_id: namespace_id.to_string(),
            directory,
            error_handler,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Overrides the 30-second polling cadence used by watches started from
    /// this client.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Announcing is not supported by the read-only role; succeeds without a
    /// withdraw handle for any input.
    pub async fn register(
        &self,
        _event_name: &str,
        _event_version: u16,
        _ipv4: &str,
        _port: u16,
    ) -> Result<Option<Deregistration>, DiscoveryError> {
        Ok(None)
    }

    /// Starts watching the event stream's publisher set.
    ///
    /// Resolution happens before any background work: an unresolved stream
    /// returns the error and spawns nothing.
    pub async fn watch(
        &self,
        event_name: &str,
        event_version: u16,
        listener: Arc<dyn EndpointListener>,
    ) -> Result<WatchHandle, DiscoveryError> {
        let service_name = service_name_for_event(event_name, event_version);
        let service_id =
            resolve_service_id(self.directory.as_ref(), &self.namespace_id, &service_name).await?;

        debug!(
            "{}{} watching {} (service id {})",
            CLIENT_TAG, CLIENT_FN_WATCH_TAG, service_name, service_id
        );

        Ok(spawn_endpoint_poll_loop(
            Arc::clone(&self.directory),
            service_id,
            listener,
            self.error_handler.clone(),
            self.poll_interval,
        ))
    }
}

#[async_trait]
impl PublishersRegistry for Client {
    async fn register(
        &self,
        event_name: &str,
        event_version: u16,
        ipv4: &str,
        port: u16,
    ) -> Result<Option<Deregistration>, DiscoveryError> {
        Client::register(self, event_name, event_version, ipv4, port).await
    }

    async fn watch(
        &self,
        event_name: &str,
        event_version: u16,
        listener: Arc<dyn EndpointListener>,
    ) -> Result<WatchHandle, DiscoveryError> {
        Client::watch(self, event_name, event_version, listener).await
    }
}
