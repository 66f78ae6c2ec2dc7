use std::sync::{Arc, RwLock};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::api::gateway::AdminApi;
use crate::api::types::PendingCounts;

/// Latest pending-counts aggregate, replaced wholesale on every re-fetch.
/// The nested totals are server-enforced and displayed as-is.
#[derive(Debug, Default)]
pub struct PendingCountsStore {
    inner: RwLock<PendingCounts>,
}

impl PendingCountsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> PendingCounts {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn replace(&self, counts: PendingCounts) {
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = counts;
    }
}

/// Re-fetches the pending-counts aggregate whenever the notification log's
/// `last_update` timestamp moves.
///
/// Invalidation-by-timestamp: this watcher never looks at individual
/// notification events, only at the shared watch channel, so the bridge and
/// the counts stay decoupled.
pub struct PendingCountsWatcher<A: AdminApi + ?Sized + 'static> {
    api: Arc<A>,
    store: Arc<PendingCountsStore>,
    last_update: watch::Receiver<i64>,
}

impl<A: AdminApi + ?Sized + 'static> PendingCountsWatcher<A> {
    pub fn new(
        api: Arc<A>,
        store: Arc<PendingCountsStore>,
        last_update: watch::Receiver<i64>,
    ) -> Self {
        Self {
            api,
            store,
            last_update,
        }
    }

    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run())
    }

    pub async fn run(mut self) {
        // Initial load, then once per invalidation.
        self.refresh().await;
        while self.last_update.changed().await.is_ok() {
            self.refresh().await;
        }
        debug!("last_update channel closed; pending counts watcher stopping");
    }

    async fn refresh(&self) {
        match self.api.pending_counts().await {
            Ok(counts) => {
                debug!(
                    services = counts.services.total,
                    payments = counts.payments.total,
                    "pending counts refreshed"
                );
                self.store.replace(counts);
            }
            Err(e) => {
                // Stale counts are better than a crashed watcher; the next
                // invalidation retries.
                warn!(error = %e, "failed to fetch pending counts");
            }
        }
    }
}
