use async_trait::async_trait;
use serde_json::json;

use crate::core::AppError;
use crate::list::filters::ListQuery;
use crate::list::view::PageFetcher;

use super::client::AdminClient;
use super::types::{
    Customer, Holding, Notification, PageEnvelope, PendingCounts, ServiceApplication,
    Subscription, Transfer,
};

/// Seam between the list engine and the backend.
///
/// The orchestrator, dispatcher and pending-counts watcher talk to this
/// trait, never to `reqwest` directly, so all of them test against mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn list_customers(&self, query: &ListQuery) -> Result<PageEnvelope<Customer>, AppError>;
    async fn list_holdings(&self, query: &ListQuery) -> Result<PageEnvelope<Holding>, AppError>;
    async fn list_subscriptions(
        &self,
        query: &ListQuery,
    ) -> Result<PageEnvelope<Subscription>, AppError>;
    async fn list_transfers(&self, query: &ListQuery) -> Result<PageEnvelope<Transfer>, AppError>;
    async fn list_applications(
        &self,
        query: &ListQuery,
    ) -> Result<PageEnvelope<ServiceApplication>, AppError>;

    async fn approve_transfer(&self, id: &str) -> Result<Transfer, AppError>;
    async fn reject_transfer(&self, id: &str, reason: &str) -> Result<Transfer, AppError>;
    async fn approve_application(&self, id: &str) -> Result<ServiceApplication, AppError>;
    async fn reject_application(
        &self,
        id: &str,
        reason: &str,
    ) -> Result<ServiceApplication, AppError>;

    async fn notifications(&self) -> Result<Vec<Notification>, AppError>;
    async fn pending_counts(&self) -> Result<PendingCounts, AppError>;
}

#[async_trait]
impl AdminApi for AdminClient {
    async fn list_customers(&self, query: &ListQuery) -> Result<PageEnvelope<Customer>, AppError> {
        self.get("/api/customers", &query.query_pairs()).await
    }

    async fn list_holdings(&self, query: &ListQuery) -> Result<PageEnvelope<Holding>, AppError> {
        self.get("/api/holdings", &query.query_pairs()).await
    }

    async fn list_subscriptions(
        &self,
        query: &ListQuery,
    ) -> Result<PageEnvelope<Subscription>, AppError> {
        self.get("/api/subscriptions", &query.query_pairs()).await
    }

    async fn list_transfers(&self, query: &ListQuery) -> Result<PageEnvelope<Transfer>, AppError> {
        self.get("/api/payments/transfers", &query.query_pairs())
            .await
    }

    async fn list_applications(
        &self,
        query: &ListQuery,
    ) -> Result<PageEnvelope<ServiceApplication>, AppError> {
        self.get("/api/services/applications", &query.query_pairs())
            .await
    }

    async fn approve_transfer(&self, id: &str) -> Result<Transfer, AppError> {
        let path = format!("/api/payments/transfers/{}/approve", urlencoding::encode(id));
        self.post(&path, &json!({})).await
    }

    async fn reject_transfer(&self, id: &str, reason: &str) -> Result<Transfer, AppError> {
        let path = format!("/api/payments/transfers/{}/reject", urlencoding::encode(id));
        self.post(&path, &json!({ "reason": reason })).await
    }

    async fn approve_application(&self, id: &str) -> Result<ServiceApplication, AppError> {
        let path = format!(
            "/api/services/applications/{}/approve",
            urlencoding::encode(id)
        );
        self.post(&path, &json!({})).await
    }

    async fn reject_application(
        &self,
        id: &str,
        reason: &str,
    ) -> Result<ServiceApplication, AppError> {
        let path = format!(
            "/api/services/applications/{}/reject",
            urlencoding::encode(id)
        );
        self.post(&path, &json!({ "reason": reason })).await
    }

    async fn notifications(&self) -> Result<Vec<Notification>, AppError> {
        self.get("/api/notifications", &[]).await
    }

    async fn pending_counts(&self) -> Result<PendingCounts, AppError> {
        self.get("/api/pending-counts", &[]).await
    }
}

// One list page per entity; lets `ListView::sync` take the client directly.

#[async_trait]
impl PageFetcher<Customer> for AdminClient {
    async fn fetch_page(&self, query: &ListQuery) -> Result<PageEnvelope<Customer>, AppError> {
        self.list_customers(query).await
    }
}

#[async_trait]
impl PageFetcher<Holding> for AdminClient {
    async fn fetch_page(&self, query: &ListQuery) -> Result<PageEnvelope<Holding>, AppError> {
        self.list_holdings(query).await
    }
}

#[async_trait]
impl PageFetcher<Subscription> for AdminClient {
    async fn fetch_page(&self, query: &ListQuery) -> Result<PageEnvelope<Subscription>, AppError> {
        self.list_subscriptions(query).await
    }
}

#[async_trait]
impl PageFetcher<Transfer> for AdminClient {
    async fn fetch_page(&self, query: &ListQuery) -> Result<PageEnvelope<Transfer>, AppError> {
        self.list_transfers(query).await
    }
}

#[async_trait]
impl PageFetcher<ServiceApplication> for AdminClient {
    async fn fetch_page(
        &self,
        query: &ListQuery,
    ) -> Result<PageEnvelope<ServiceApplication>, AppError> {
        self.list_applications(query).await
    }
}
