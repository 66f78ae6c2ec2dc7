use std::sync::Arc;

use super::config::AppConfig;
use crate::api::client::AdminClient;
use crate::notify::pending::PendingCountsStore;
use crate::notify::store::NotificationStore;

/// Per-process service container.
///
/// The notification log and the pending-counts aggregate are one-per-process,
/// but they are reached only through this container, never as ambient
/// globals. Cloning is cheap; everything is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub api: Arc<AdminClient>,
    pub notifications: Arc<NotificationStore>,
    pub pending: Arc<PendingCountsStore>,
}

impl AppState {
    pub fn new(config: AppConfig, api: AdminClient) -> Self {
        let notifications = Arc::new(NotificationStore::new());
        let pending = Arc::new(PendingCountsStore::new());
        Self {
            config: Arc::new(config),
            api: Arc::new(api),
            notifications,
            pending,
        }
    }
}
