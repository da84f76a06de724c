//! Paginated retrieval of the full publisher-endpoint set for one service.

use crate::directory::{ServiceDirectory, DIRECTORY_PAGE_SIZE};
use crate::endpoint::PublisherEndpoint;
use crate::error::DiscoveryError;

/// Fetches every registered endpoint for `service_id`, concatenated in page
/// order and, within a page, in record order.
///
/// Any page failure aborts the whole fetch; results from earlier pages are
/// discarded so callers never see a partial snapshot.
pub(crate) async fn fetch_all_endpoints(
    directory: &dyn ServiceDirectory,
    service_id: &str,
) -> Result<Vec<PublisherEndpoint>, DiscoveryError> {
    let mut endpoints = Vec::new();
    let mut next_token: Option<String> = None;

    loop {
        let page = directory
            .list_instances(service_id, DIRECTORY_PAGE_SIZE, next_token.as_deref())
            .await?;

        endpoints.reserve(page.instances.len());
        for instance in &page.instances {
            endpoints.push(PublisherEndpoint::from_instance(instance));
        }

        next_token = page.next_token;
        if next_token.is_none() {
            return Ok(endpoints);
        }
    }
}
