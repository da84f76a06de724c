//! Per-watch polling worker that keeps one stream's endpoint snapshot fresh.

use crate::data_plane::endpoint_fetch::fetch_all_endpoints;
use crate::directory::ServiceDirectory;
use crate::endpoint::EndpointListener;
use crate::error::{DiscoveryError, ErrorHandler};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use uuid::Uuid;

const WATCH_WORKER_TAG: &str = "WatchWorker:";
const WATCH_WORKER_FN_POLL_LOOP_TAG: &str = "endpoint_poll_loop():";

/// Spacing between polling ticks unless overridden at construction.
pub(crate) const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Stop handle for one running watch.
///
/// Owns the watch's cancellation token exclusively. Dropping the handle
/// without calling [`stop`](Self::stop) leaves the watch running; only the
/// stop action tears it down.
#[derive(Debug)]
pub struct WatchHandle {
    cancellation: CancellationToken,
}

impl WatchHandle {
    /// Stops the watch.
    ///
    /// Cancellation is cooperative: an in-flight fetch is abandoned at its
    /// next suspension point and the worker exits without delivering again.
    /// Consuming `self` makes a second stop impossible.
    pub fn stop(self) {
        self.cancellation.cancel();
    }
}

/// Starts the background worker for one watch and hands back its stop handle.
pub(crate) fn spawn_endpoint_poll_loop(
    directory: Arc<dyn ServiceDirectory>,
    service_id: String,
    listener: Arc<dyn EndpointListener>,
    error_handler: Option<ErrorHandler>,
    poll_interval: Duration,
) -> WatchHandle {
    let cancellation = CancellationToken::new();
    let worker_token = cancellation.clone();

    tokio::spawn(async move {
        endpoint_poll_loop(
            Uuid::new_v4().to_string(),
            directory,
            service_id,
            listener,
            error_handler,
            poll_interval,
            worker_token,
        )
        .await;
    });

    WatchHandle { cancellation }
}

async fn endpoint_poll_loop(
    id: String,
    directory: Arc<dyn ServiceDirectory>,
    service_id: String,
    listener: Arc<dyn EndpointListener>,
    error_handler: Option<ErrorHandler>,
    poll_interval: Duration,
    cancellation: CancellationToken,
) {
    debug!(
        "{}:{}:{} polling service {} every {:?}",
        id, WATCH_WORKER_TAG, WATCH_WORKER_FN_POLL_LOOP_TAG, service_id, poll_interval
    );

    let mut ticker = time::interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // An interval's first tick completes immediately; consume it here so
    // every wait at the bottom of the loop spans one full interval.
    ticker.tick().await;

    loop {
        let fetched = tokio::select! {
            biased;
            _ = cancellation.cancelled() => break,
            fetched = fetch_all_endpoints(directory.as_ref(), &service_id) => fetched,
        };

        match fetched {
            Ok(endpoints) => listener.on_endpoints(endpoints).await,
            Err(err) => notify_fetch_error(&id, &error_handler, err),
        }

        tokio::select! {
            biased;
            _ = cancellation.cancelled() => break,
            _ = ticker.tick() => {}
        }
    }

    debug!(
        "{}:{}:{} worker stopped for service {}",
        id, WATCH_WORKER_TAG, WATCH_WORKER_FN_POLL_LOOP_TAG, service_id
    );
}

fn notify_fetch_error(id: &str, error_handler: &Option<ErrorHandler>, err: DiscoveryError) {
    match error_handler {
        Some(handler) => handler(err),
        None => warn!(
            "{}:{}:{} dropping fetch error: {}",
            id, WATCH_WORKER_TAG, WATCH_WORKER_FN_POLL_LOOP_TAG, err
        ),
    }
}
