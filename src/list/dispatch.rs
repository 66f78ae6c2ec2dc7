use crate::api::gateway::AdminApi;
use crate::core::AppError;
use crate::list::toast::Notifier;
use crate::list::view::{ListView, PageFetcher, PageStats};

/// A mutating call against the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    ApproveTransfer { id: String },
    RejectTransfer { id: String, reason: String },
    ApproveApplication { id: String },
    RejectApplication { id: String, reason: String },
}

impl AdminAction {
    /// Client-side preconditions, checked before any request is sent.
    pub fn validate(&self) -> Result<(), AppError> {
        let (id, reason) = match self {
            Self::ApproveTransfer { id } | Self::ApproveApplication { id } => (id, None),
            Self::RejectTransfer { id, reason } | Self::RejectApplication { id, reason } => {
                (id, Some(reason))
            }
        };
        if id.trim().is_empty() {
            return Err(AppError::Validation("A record must be selected".to_string()));
        }
        if let Some(reason) = reason {
            if reason.trim().is_empty() {
                return Err(AppError::Validation(
                    "A rejection reason is required".to_string(),
                ));
            }
        }
        Ok(())
    }

    fn success_message(&self) -> &'static str {
        match self {
            Self::ApproveTransfer { .. } => "Transfer approved",
            Self::RejectTransfer { .. } => "Transfer rejected",
            Self::ApproveApplication { .. } => "Application approved",
            Self::RejectApplication { .. } => "Application rejected",
        }
    }

    fn failure_message(&self) -> &'static str {
        match self {
            Self::ApproveTransfer { .. } => "Failed to approve transfer",
            Self::RejectTransfer { .. } => "Failed to reject transfer",
            Self::ApproveApplication { .. } => "Failed to approve application",
            Self::RejectApplication { .. } => "Failed to reject application",
        }
    }
}

/// Runs approve/reject calls and resynchronizes the list afterwards.
///
/// No optimistic patching: a successful mutation is followed by exactly one
/// re-fetch of the current page/filters, so the display always matches the
/// backend. A failed mutation leaves all list state untouched.
#[derive(Debug, Default)]
pub struct Dispatcher {
    processing: bool,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirrors the disabled state of the submit button: while a mutation is
    /// in flight, further submits are ignored.
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Returns true when the mutation succeeded and the list was resynced.
    pub async fn execute<T, S, A, F>(
        &mut self,
        action: AdminAction,
        api: &A,
        view: &mut ListView<T, S>,
        fetcher: &F,
        notifier: &dyn Notifier,
    ) -> bool
    where
        T: Send + Sync + 'static,
        S: PageStats<T>,
        A: AdminApi + ?Sized,
        F: PageFetcher<T> + ?Sized,
    {
        if self.processing {
            return false;
        }
        if let Err(e) = action.validate() {
            notifier.validation(&e.to_string());
            return false;
        }

        self.processing = true;
        let result = match &action {
            AdminAction::ApproveTransfer { id } => api.approve_transfer(id).await.map(|_| ()),
            AdminAction::RejectTransfer { id, reason } => {
                api.reject_transfer(id, reason).await.map(|_| ())
            }
            AdminAction::ApproveApplication { id } => {
                api.approve_application(id).await.map(|_| ())
            }
            AdminAction::RejectApplication { id, reason } => {
                api.reject_application(id, reason).await.map(|_| ())
            }
        };

        let ok = match result {
            Ok(()) => {
                notifier.success(action.success_message());
                view.sync(fetcher).await;
                true
            }
            Err(e) => {
                notifier.error(&format!("{}: {e}", action.failure_message()));
                false
            }
        };
        self.processing = false;
        ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::gateway::MockAdminApi;
    use crate::api::types::{
        PageEnvelope, ReviewStatus, Transfer, TransferKind, TransferStats,
    };
    use crate::core::AppError;
    use crate::list::toast::{MemoryNotifier, ToastKind};
    use crate::list::view::MockPageFetcher;

    fn transfer(id: &str, status: ReviewStatus) -> Transfer {
        Transfer {
            id: id.to_string(),
            customer_id: "c-1".to_string(),
            kind: TransferKind::Deposit,
            amount: 500.0,
            status,
            created_at: chrono::Utc::now(),
        }
    }

    fn transfer_page(items: Vec<Transfer>) -> PageEnvelope<Transfer> {
        let total = items.len() as u64;
        PageEnvelope {
            data: items,
            total,
            page: 1,
            limit: 10,
            total_pages: None,
        }
    }

    #[tokio::test]
    async fn empty_rejection_reason_sends_no_request() {
        let api = MockAdminApi::new(); // any call would panic
        let mut fetcher = MockPageFetcher::<Transfer>::new();
        fetcher.expect_fetch_page().times(0);
        let notifier = MemoryNotifier::new();
        let mut view = ListView::<Transfer, TransferStats>::new(10);
        let mut dispatcher = Dispatcher::new();

        let ok = dispatcher
            .execute(
                AdminAction::RejectTransfer {
                    id: "t-1".to_string(),
                    reason: "   ".to_string(),
                },
                &api,
                &mut view,
                &fetcher,
                &notifier,
            )
            .await;

        assert!(!ok);
        let toasts = notifier.take();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Validation);
        assert_eq!(toasts[0].message, "A rejection reason is required");
    }

    #[tokio::test]
    async fn successful_approve_resyncs_current_page_once() {
        let mut api = MockAdminApi::new();
        api.expect_approve_transfer()
            .withf(|id: &str| id == "t-1")
            .times(1)
            .returning(|id| Ok(transfer(id, ReviewStatus::Approved)));

        // Filtering by pending: the approved record drops out on resync.
        let mut fetcher = MockPageFetcher::<Transfer>::new();
        fetcher
            .expect_fetch_page()
            .times(1)
            .returning(|_| Ok(transfer_page(vec![transfer("t-2", ReviewStatus::Pending)])));

        let notifier = MemoryNotifier::new();
        let mut view = ListView::<Transfer, TransferStats>::new(10);
        view.set_filter("status", "pending");
        let ticket = view.begin_fetch();
        view.apply(
            ticket,
            Ok(transfer_page(vec![
                transfer("t-1", ReviewStatus::Pending),
                transfer("t-2", ReviewStatus::Pending),
            ])),
        );

        let mut dispatcher = Dispatcher::new();
        let ok = dispatcher
            .execute(
                AdminAction::ApproveTransfer {
                    id: "t-1".to_string(),
                },
                &api,
                &mut view,
                &fetcher,
                &notifier,
            )
            .await;

        assert!(ok);
        assert!(!dispatcher.is_processing());
        assert_eq!(view.items().len(), 1);
        assert_eq!(view.items()[0].id, "t-2");
        let toasts = notifier.take();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Success);
    }

    #[tokio::test]
    async fn failed_mutation_leaves_state_untouched() {
        let mut api = MockAdminApi::new();
        api.expect_reject_transfer()
            .times(1)
            .returning(|_, _| Err(AppError::Api("transfer already settled".to_string())));

        let mut fetcher = MockPageFetcher::<Transfer>::new();
        fetcher.expect_fetch_page().times(0);

        let notifier = MemoryNotifier::new();
        let mut view = ListView::<Transfer, TransferStats>::new(10);
        let ticket = view.begin_fetch();
        view.apply(
            ticket,
            Ok(transfer_page(vec![transfer("t-1", ReviewStatus::Pending)])),
        );

        let mut dispatcher = Dispatcher::new();
        let ok = dispatcher
            .execute(
                AdminAction::RejectTransfer {
                    id: "t-1".to_string(),
                    reason: "duplicate".to_string(),
                },
                &api,
                &mut view,
                &fetcher,
                &notifier,
            )
            .await;

        assert!(!ok);
        assert_eq!(view.items().len(), 1);
        assert_eq!(view.items()[0].status, ReviewStatus::Pending);
        let toasts = notifier.take();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Error);
        assert!(toasts[0].message.contains("transfer already settled"));
    }
}
