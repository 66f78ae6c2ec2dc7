use std::sync::RwLock;

use chrono::Utc;
use tokio::sync::watch;

use crate::api::types::Notification;

struct Inner {
    /// Ordered log, newest first.
    log: Vec<Notification>,
    unread: usize,
}

/// In-memory notification log for one process.
///
/// The websocket bridge is the only writer of new entries; read-state
/// mutations come from the UI layer. Nothing here survives the process:
/// the full history is re-fetched on every connect.
///
/// Every arriving event bumps `last_update`, published on a watch channel.
/// The pending-counts watcher subscribes to that channel instead of to the
/// events themselves, which keeps the two concerns decoupled.
pub struct NotificationStore {
    inner: RwLock<Inner>,
    last_update: watch::Sender<i64>,
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationStore {
    pub fn new() -> Self {
        let (last_update, _) = watch::channel(0);
        Self {
            inner: RwLock::new(Inner {
                log: Vec::new(),
                unread: 0,
            }),
            last_update,
        }
    }

    /// Unix millis of the last arrival; 0 until anything arrives.
    pub fn subscribe(&self) -> watch::Receiver<i64> {
        self.last_update.subscribe()
    }

    /// Replace the log with freshly fetched history, newest first.
    pub fn replace_all(&self, mut items: Vec<Notification>) {
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let unread = items.iter().filter(|n| !n.is_read).count();
        {
            let mut inner = self.write();
            inner.log = items;
            inner.unread = unread;
        }
        self.bump();
    }

    /// Append one pushed event to the front of the log.
    pub fn push(&self, notification: Notification) {
        {
            let mut inner = self.write();
            if !notification.is_read {
                inner.unread += 1;
            }
            inner.log.insert(0, notification);
        }
        self.bump();
    }

    /// Returns false when the id is unknown.
    pub fn mark_as_read(&self, id: &str) -> bool {
        let mut inner = self.write();
        match inner.log.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                if !n.is_read {
                    n.is_read = true;
                    inner.unread -= 1;
                }
                true
            }
            None => false,
        }
    }

    pub fn mark_all_as_read(&self) {
        let mut inner = self.write();
        for n in inner.log.iter_mut() {
            n.is_read = true;
        }
        inner.unread = 0;
    }

    /// Local only; whether the backend forgets too is its own contract.
    pub fn clear_all(&self) {
        let mut inner = self.write();
        inner.log.clear();
        inner.unread = 0;
    }

    pub fn unread_count(&self) -> usize {
        self.read().unread
    }

    pub fn len(&self) -> usize {
        self.read().log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().log.is_empty()
    }

    pub fn snapshot(&self) -> Vec<Notification> {
        self.read().log.clone()
    }

    fn bump(&self) {
        self.last_update.send_replace(Utc::now().timestamp_millis());
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{NotificationAction, NotificationCategory, NotificationMeta};
    use chrono::{Duration, Utc};

    fn notification(id: &str, is_read: bool, age_minutes: i64) -> Notification {
        Notification {
            id: id.to_string(),
            title: "Transfer submitted".to_string(),
            message: "A deposit needs review".to_string(),
            category: NotificationCategory::Payment,
            action: NotificationAction::Submitted,
            metadata: NotificationMeta {
                entity_id: "t-1".to_string(),
                entity_type: "transfer".to_string(),
            },
            is_read,
            created_at: Utc::now() - Duration::minutes(age_minutes),
        }
    }

    #[test]
    fn unread_count_matches_entries_after_replace() {
        let store = NotificationStore::new();
        store.replace_all(vec![
            notification("n-1", false, 1),
            notification("n-2", true, 2),
            notification("n-3", false, 3),
        ]);
        assert_eq!(store.unread_count(), 2);
        assert_eq!(
            store.unread_count(),
            store.snapshot().iter().filter(|n| !n.is_read).count()
        );
    }

    #[test]
    fn history_is_ordered_newest_first() {
        let store = NotificationStore::new();
        store.replace_all(vec![
            notification("old", false, 60),
            notification("new", false, 1),
        ]);
        let log = store.snapshot();
        assert_eq!(log[0].id, "new");
        assert_eq!(log[1].id, "old");

        store.push(notification("newest", false, 0));
        assert_eq!(store.snapshot()[0].id, "newest");
    }

    #[test]
    fn mark_as_read_flips_entry_and_counter_once() {
        let store = NotificationStore::new();
        store.replace_all(vec![notification("n-1", false, 1)]);
        assert_eq!(store.unread_count(), 1);

        assert!(store.mark_as_read("n-1"));
        assert_eq!(store.unread_count(), 0);
        assert!(store.snapshot()[0].is_read);

        // Second mark is a no-op, not an underflow.
        assert!(store.mark_as_read("n-1"));
        assert_eq!(store.unread_count(), 0);

        assert!(!store.mark_as_read("missing"));
    }

    #[test]
    fn mark_all_and_clear_all() {
        let store = NotificationStore::new();
        store.replace_all(vec![
            notification("n-1", false, 1),
            notification("n-2", false, 2),
        ]);

        store.mark_all_as_read();
        assert_eq!(store.unread_count(), 0);
        assert!(store.snapshot().iter().all(|n| n.is_read));

        store.clear_all();
        assert!(store.is_empty());
        assert_eq!(store.unread_count(), 0);
    }

    #[test]
    fn push_bumps_last_update() {
        let store = NotificationStore::new();
        let rx = store.subscribe();
        assert_eq!(*rx.borrow(), 0);

        store.push(notification("n-1", false, 0));
        assert!(rx.has_changed().unwrap());
        assert!(*rx.borrow() > 0);
    }
}
