//! Service-directory backend seam consumed by every discovery flow.

use async_trait::async_trait;
use std::collections::HashMap;
use std::error::Error;
use thiserror::Error;

/// Attribute key under which the directory stores an instance's IPv4 address.
pub const INSTANCE_IPV4_ATTRIBUTE: &str = "AWS_INSTANCE_IPV4";

/// Attribute key under which the directory stores an instance's port.
pub const INSTANCE_PORT_ATTRIBUTE: &str = "AWS_INSTANCE_PORT";

/// Page size requested from every paginated directory call.
pub const DIRECTORY_PAGE_SIZE: u32 = 100;

/// Failure reported by a [`ServiceDirectory`] call.
///
/// Carries the backend's own error as the source so callers see the original
/// failure unchanged.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DirectoryError {
    message: String,
    #[source]
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl DirectoryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// One service record as listed by the directory.
///
/// Name and id are optional because the backend may return partially
/// populated records; resolution skips those instead of failing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceSummary {
    pub name: Option<String>,
    pub id: Option<String>,
}

/// One registered instance under a service, carrying address attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstanceRecord {
    pub id: String,
    pub attributes: HashMap<String, String>,
}

/// One page of service records plus the continuation token, if more remain.
#[derive(Clone, Debug, Default)]
pub struct ServicePage {
    pub services: Vec<ServiceSummary>,
    pub next_token: Option<String>,
}

/// One page of instance records plus the continuation token, if more remain.
#[derive(Clone, Debug, Default)]
pub struct InstancePage {
    pub instances: Vec<InstanceRecord>,
    pub next_token: Option<String>,
}

/// Remote directory of discoverable services, grouped by namespace.
///
/// Implementations wrap a concrete backend client; wire protocol,
/// authentication, and paging-token semantics stay behind this trait. The
/// handle is shared across concurrently active watches and registrations, so
/// implementations must be safe for concurrent use.
#[async_trait]
pub trait ServiceDirectory: Send + Sync {
    /// Lists services registered in one namespace, one page at a time.
    async fn list_services(
        &self,
        namespace_id: &str,
        max_results: u32,
        next_token: Option<&str>,
    ) -> Result<ServicePage, DirectoryError>;

    /// Lists instances registered under one service, one page at a time.
    async fn list_instances(
        &self,
        service_id: &str,
        max_results: u32,
        next_token: Option<&str>,
    ) -> Result<InstancePage, DirectoryError>;

    /// Creates or replaces one instance record under a service.
    async fn register_instance(
        &self,
        service_id: &str,
        instance_id: &str,
        attributes: HashMap<String, String>,
    ) -> Result<(), DirectoryError>;

    /// Deletes one instance record from a service.
    async fn deregister_instance(
        &self,
        service_id: &str,
        instance_id: &str,
    ) -> Result<(), DirectoryError>;
}
