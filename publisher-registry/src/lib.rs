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

//! # publisher-registry
//!
//! `publisher-registry` resolves the set of network endpoints publishing a
//! logical event stream and keeps that set fresh by polling a remote service
//! directory. The read-write [`Registry`] role additionally announces local
//! addresses as publishers; the read-only [`Client`] role watches only.
//!
//! The concrete directory backend stays behind the [`ServiceDirectory`] trait:
//! four paginated operations (list services, list instances, register
//! instance, deregister instance). Everything else — naming conventions,
//! pagination, the polling worker, registration lifecycle — lives here.
//!
//! ## Watching a stream
//!
//! A watch resolves the stream's service identity once, then spawns one
//! background worker that fetches the full endpoint snapshot immediately and
//! again every polling interval, delivering each snapshot to an
//! [`EndpointListener`]. The returned [`WatchHandle`] stops the worker.
//!
//! ```
//! use std::collections::HashMap;
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use publisher_registry::{
//!     Client, DirectoryError, EndpointListener, InstancePage, InstanceRecord,
//!     PublisherEndpoint, ServiceDirectory, ServicePage, ServiceSummary,
//!     INSTANCE_IPV4_ATTRIBUTE, INSTANCE_PORT_ATTRIBUTE,
//! };
//!
//! # struct StaticDirectory;
//! #
//! # #[async_trait]
//! # impl ServiceDirectory for StaticDirectory {
//! #     async fn list_services(
//! #         &self,
//! #         _namespace_id: &str,
//! #         _max_results: u32,
//! #         _next_token: Option<&str>,
//! #     ) -> Result<ServicePage, DirectoryError> {
//! #         Ok(ServicePage {
//! #             services: vec![ServiceSummary {
//! #                 name: Some("bus-orders-v1".to_string()),
//! #                 id: Some("svc-1".to_string()),
//! #             }],
//! #             next_token: None,
//! #         })
//! #     }
//! #
//! #     async fn list_instances(
//! #         &self,
//! #         _service_id: &str,
//! #         _max_results: u32,
//! #         _next_token: Option<&str>,
//! #     ) -> Result<InstancePage, DirectoryError> {
//! #         Ok(InstancePage {
//! #             instances: vec![InstanceRecord {
//! #                 id: "10.0.0.7:9100".to_string(),
//! #                 attributes: HashMap::from([
//! #                     (INSTANCE_IPV4_ATTRIBUTE.to_string(), "10.0.0.7".to_string()),
//! #                     (INSTANCE_PORT_ATTRIBUTE.to_string(), "9100".to_string()),
//! #                 ]),
//! #             }],
//! #             next_token: None,
//! #         })
//! #     }
//! #
//! #     async fn register_instance(
//! #         &self,
//! #         _service_id: &str,
//! #         _instance_id: &str,
//! #         _attributes: HashMap<String, String>,
//! #     ) -> Result<(), DirectoryError> {
//! #         Ok(())
//! #     }
//! #
//! #     async fn deregister_instance(
//! #         &self,
//! #         _service_id: &str,
//! #         _instance_id: &str,
//! #     ) -> Result<(), DirectoryError> {
//! #         Ok(())
//! #     }
//! # }
//! #
//! struct ForwardingListener(tokio::sync::mpsc::UnboundedSender<Vec<PublisherEndpoint>>);
//!
//! #[async_trait]
//! impl EndpointListener for ForwardingListener {
//!     async fn on_endpoints(&self, endpoints: Vec<PublisherEndpoint>) {
//!         let _ = self.0.send(endpoints);
//!     }
//! }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let (sender, mut receiver) = tokio::sync::mpsc::unbounded_channel();
//! let client = Client::new(Arc::new(StaticDirectory), "prod-bus", None);
//!
//! let watch = client
//!     .watch("orders", 1, Arc::new(ForwardingListener(sender)))
//!     .await
//!     .unwrap();
//!
//! let endpoints = receiver.recv().await.unwrap();
//! assert_eq!(endpoints[0].as_str(), "tcp://10.0.0.7:9100");
//!
//! watch.stop();
//! # });
//! ```
//!
//! ## Announcing a publisher
//!
//! [`Registry::register`] resolves the stream, registers the address under a
//! deterministic instance identifier, and returns a [`Deregistration`] handle
//! whose single use withdraws exactly that instance.
//!
//! ## Error routing
//!
//! Resolution and one-shot operations surface errors directly to the caller.
//! Inside a running watch, fetch failures go to the optional error handler
//! supplied at construction (or are dropped) and never terminate the loop.
//!
//! ## Observability model
//!
//! The crate uses `tracing` for logs/events and never installs a global
//! subscriber; binaries own one-time `tracing_subscriber` initialization at
//! process boundaries.

mod control_plane;
mod data_plane;

mod client;
pub use client::Client;

mod directory;
pub use directory::{
    DirectoryError, InstancePage, InstanceRecord, ServiceDirectory, ServicePage, ServiceSummary,
    DIRECTORY_PAGE_SIZE, INSTANCE_IPV4_ATTRIBUTE, INSTANCE_PORT_ATTRIBUTE,
};

mod endpoint;
pub use endpoint::{EndpointListener, PublisherEndpoint};

mod error;
pub use error::{DiscoveryError, ErrorHandler};

mod publishers_registry;
pub use publishers_registry::PublishersRegistry;

mod registry;
pub use registry::Registry;

pub use control_plane::registration::Deregistration;
pub use data_plane::watch_worker::WatchHandle;
