//! Service-identity resolution against the namespace directory listing.

use crate::directory::{ServiceDirectory, ServiceSummary, DIRECTORY_PAGE_SIZE};
use crate::error::DiscoveryError;
use tracing::debug;

const SERVICE_RESOLUTION_TAG: &str = "ServiceResolution:";

/// Resolves the directory service id carrying `service_name` inside
/// `namespace_id`.
///
/// Pages through the namespace listing until the first record whose name
/// matches; remaining pages are never fetched. Records missing a name or id
/// are skipped. Exhausting the listing without a match fails with
/// [`DiscoveryError::ServiceDoesNotExist`].
pub(crate) async fn resolve_service_id(
    directory: &dyn ServiceDirectory,
    namespace_id: &str,
    service_name: &str,
) -> Result<String, DiscoveryError> {
    let mut next_token: Option<String> = None;

    loop {
        let page = directory
            .list_services(namespace_id, DIRECTORY_PAGE_SIZE, next_token.as_deref())
            .await?;

        for service in page.services {
            let ServiceSummary {
                name: Some(name),
                id: Some(id),
            } = service
            else {
                continue;
            };

            if name == service_name {
                debug!(
                    "{} resolved service {} to id {}",
                    SERVICE_RESOLUTION_TAG, service_name, id
                );
                return Ok(id);
            }
        }

        next_token = page.next_token;
        if next_token.is_none() {
            return Err(DiscoveryError::ServiceDoesNotExist {
                service_name: service_name.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::resolve_service_id;
    use crate::directory::{
        DirectoryError, InstancePage, ServiceDirectory, ServicePage, ServiceSummary,
    };
    use crate::error::DiscoveryError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex as StdMutex;

    fn summary(name: Option<&str>, id: Option<&str>) -> ServiceSummary {
        ServiceSummary {
            name: name.map(str::to_string),
            id: id.map(str::to_string),
        }
    }

    /// Serves pre-baked service pages in call order and records the
    /// continuation tokens it was asked for.
    struct PagedDirectory {
        service_pages: Vec<ServicePage>,
        requested_tokens: StdMutex<Vec<Option<String>>>,
    }

    impl PagedDirectory {
        fn new(service_pages: Vec<ServicePage>) -> Self {
            Self {
                service_pages,
                requested_tokens: StdMutex::new(Vec::new()),
            }
        }

        fn list_services_call_count(&self) -> usize {
            self.requested_tokens
                .lock()
                .expect("lock requested_tokens")
                .len()
        }
    }

    #[async_trait]
    impl ServiceDirectory for PagedDirectory {
        async fn list_services(
            &self,
            _namespace_id: &str,
            _max_results: u32,
            next_token: Option<&str>,
        ) -> Result<ServicePage, DirectoryError> {
            let mut requested = self.requested_tokens.lock().expect("lock requested_tokens");
            requested.push(next_token.map(str::to_string));
            Ok(self.service_pages[requested.len() - 1].clone())
        }

        async fn list_instances(
            &self,
            _service_id: &str,
            _max_results: u32,
            _next_token: Option<&str>,
        ) -> Result<InstancePage, DirectoryError> {
            Err(DirectoryError::new("not used in tests"))
        }

        async fn register_instance(
            &self,
            _service_id: &str,
            _instance_id: &str,
            _attributes: HashMap<String, String>,
        ) -> Result<(), DirectoryError> {
            Err(DirectoryError::new("not used in tests"))
        }

        async fn deregister_instance(
            &self,
            _service_id: &str,
            _instance_id: &str,
        ) -> Result<(), DirectoryError> {
            Err(DirectoryError::new("not used in tests"))
        }
    }

    struct FailingDirectory;

    #[async_trait]
    impl ServiceDirectory for FailingDirectory {
        async fn list_services(
            &self,
            _namespace_id: &str,
            _max_results: u32,
            _next_token: Option<&str>,
        ) -> Result<ServicePage, DirectoryError> {
            Err(DirectoryError::new("directory unavailable"))
        }

        async fn list_instances(
            &self,
            _service_id: &str,
            _max_results: u32,
            _next_token: Option<&str>,
        ) -> Result<InstancePage, DirectoryError> {
            Err(DirectoryError::new("not used in tests"))
        }

        async fn register_instance(
            &self,
            _service_id: &str,
            _instance_id: &str,
            _attributes: HashMap<String, String>,
        ) -> Result<(), DirectoryError> {
            Err(DirectoryError::new("not used in tests"))
        }

        async fn deregister_instance(
            &self,
            _service_id: &str,
            _instance_id: &str,
        ) -> Result<(), DirectoryError> {
            Err(DirectoryError::new("not used in tests"))
        }
    }

    #[tokio::test]
    async fn match_on_last_page_issues_one_call_per_page_and_stops() {
        let directory = PagedDirectory::new(vec![
            ServicePage {
                services: vec![summary(Some("just-some-service"), Some("svc-1"))],
                next_token: Some("page-2".to_string()),
            },
            ServicePage {
                services: vec![summary(Some("another-service"), Some("svc-2"))],
                next_token: Some("page-3".to_string()),
            },
            ServicePage {
                services: vec![
                    summary(Some("bus-orders-v1"), Some("svc-3")),
                    summary(Some("bus-orders-v2"), Some("svc-4")),
                ],
                // A further page exists, but the match must stop the scan.
                next_token: Some("page-4".to_string()),
            },
        ]);

        let resolved = resolve_service_id(&directory, "test-namespace", "bus-orders-v1")
            .await
            .expect("service resolves");

        assert_eq!(resolved, "svc-3");
        assert_eq!(directory.list_services_call_count(), 3);
    }

    #[tokio::test]
    async fn pagination_threads_continuation_tokens_through() {
        let directory = PagedDirectory::new(vec![
            ServicePage {
                services: Vec::new(),
                next_token: Some("token-a".to_string()),
            },
            ServicePage {
                services: vec![summary(Some("bus-orders-v1"), Some("svc-1"))],
                next_token: None,
            },
        ]);

        resolve_service_id(&directory, "test-namespace", "bus-orders-v1")
            .await
            .expect("service resolves");

        let requested = directory
            .requested_tokens
            .lock()
            .expect("lock requested_tokens")
            .clone();
        assert_eq!(requested, vec![None, Some("token-a".to_string())]);
    }

    #[tokio::test]
    async fn exhausted_listing_fails_with_service_does_not_exist() {
        let directory = PagedDirectory::new(vec![
            ServicePage {
                services: vec![summary(Some("just-some-service"), Some("svc-1"))],
                next_token: Some("page-2".to_string()),
            },
            ServicePage {
                services: vec![summary(Some("another-service"), Some("svc-2"))],
                next_token: None,
            },
        ]);

        let err = resolve_service_id(&directory, "test-namespace", "bus-orders-v9")
            .await
            .expect_err("no service matches");

        assert!(matches!(
            err,
            DiscoveryError::ServiceDoesNotExist { service_name } if service_name == "bus-orders-v9"
        ));
        assert_eq!(directory.list_services_call_count(), 2);
    }

    #[tokio::test]
    async fn records_missing_name_or_id_are_skipped() {
        let directory = PagedDirectory::new(vec![ServicePage {
            services: vec![
                // Matching name but no id must not resolve.
                summary(Some("bus-orders-v1"), None),
                summary(None, Some("svc-anonymous")),
                summary(Some("bus-orders-v1"), Some("svc-2")),
            ],
            next_token: None,
        }]);

        let resolved = resolve_service_id(&directory, "test-namespace", "bus-orders-v1")
            .await
            .expect("complete record resolves");

        assert_eq!(resolved, "svc-2");
    }

    #[tokio::test]
    async fn backend_error_aborts_resolution_unchanged() {
        let err = resolve_service_id(&FailingDirectory, "test-namespace", "bus-orders-v1")
            .await
            .expect_err("listing failure propagates");

        assert!(matches!(err, DiscoveryError::Directory(_)));
        assert_eq!(err.to_string(), "directory unavailable");
    }
}
