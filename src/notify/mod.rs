//! Real-time notification bridge and the pending-counts aggregate it
//! invalidates.

pub mod bridge;
pub mod pending;
pub mod routes;
pub mod store;

pub use bridge::NotificationBridge;
pub use pending::{PendingCountsStore, PendingCountsWatcher};
pub use store::NotificationStore;
