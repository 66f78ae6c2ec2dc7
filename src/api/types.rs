//! Wire DTOs for the admin REST backend.
//!
//! The backend owns these shapes; the client never derives new fields beyond
//! pure display math (`Holding::pnl` and friends). List endpoints all return
//! the same envelope: `{data, total, page, limit, totalPages}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::list::view::PageStats;

/// Backend error body. Any JSON object deserializes into this; `is_error`
/// defaults to false so success payloads pass through untouched.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub is_error: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    /// Some list endpoints omit this; it is then computed client-side.
    #[serde(default)]
    pub total_pages: Option<u32>,
}

impl<T> PageEnvelope<T> {
    pub fn meta(&self) -> PaginationMeta {
        PaginationMeta::new(self.total, self.page, self.limit, self.total_pages)
    }
}

/// Server-reported pagination metadata, replaced wholesale on every fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationMeta {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl PaginationMeta {
    pub fn new(total: u64, page: u32, limit: u32, total_pages: Option<u32>) -> Self {
        let limit = limit.max(1);
        let total_pages =
            total_pages.unwrap_or_else(|| ((total + limit as u64 - 1) / limit as u64) as u32);
        Self {
            total,
            page: page.max(1),
            limit,
            total_pages,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A customer's position in one stock.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: String,
    pub customer_id: String,
    pub symbol: String,
    pub shares: f64,
    pub cost_basis: f64,
    pub market_value: f64,
}

impl Holding {
    pub fn pnl(&self) -> f64 {
        self.market_value - self.cost_basis
    }

    /// Percentage gain over cost basis. `None` when the cost basis is zero
    /// or not a finite number.
    pub fn pnl_percent(&self) -> Option<f64> {
        if self.cost_basis == 0.0 || !self.cost_basis.is_finite() {
            return None;
        }
        Some(self.pnl() / self.cost_basis * 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub customer_id: String,
    pub plan: String,
    pub amount: f64,
    pub status: ReviewStatus,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferKind {
    Deposit,
    Withdrawal,
    Payment,
}

/// A deposit, withdrawal or internal payment awaiting admin review.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub id: String,
    pub customer_id: String,
    pub kind: TransferKind,
    pub amount: f64,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
}

/// A customer's request to enroll in a paid service tier.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceApplication {
    pub id: String,
    pub customer_id: String,
    pub service: String,
    pub status: ReviewStatus,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    Service,
    Payment,
    Transfer,
    Subscription,
    System,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationAction {
    Submitted,
    Approved,
    Rejected,
    Applied,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationMeta {
    pub entity_id: String,
    pub entity_type: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub category: NotificationCategory,
    pub action: NotificationAction,
    pub metadata: NotificationMeta,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePendingCounts {
    pub total: u64,
    pub premium_membership: u64,
    pub international_stock_accounts: u64,
    pub guaranteed_returns: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPendingCounts {
    pub total: u64,
    pub subscription_payments: u64,
    pub stock_pick_payments: u64,
    pub deposits: u64,
    pub investment_payments: u64,
}

/// Unresolved work awaiting admin action. The nested totals are enforced
/// server-side; the client displays them as-is.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingCounts {
    pub services: ServicePendingCounts,
    pub payments: PaymentPendingCounts,
}

// ---------------------------------------------------------------------------
// Page-local aggregates.
//
// These are recomputed from the records of the page just received, so the
// sums cover the current page only, never the full result set.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoldingStats {
    pub count: usize,
    pub total_market_value: f64,
    pub total_cost_basis: f64,
    pub total_pnl: f64,
}

impl PageStats<Holding> for HoldingStats {
    fn compute(items: &[Holding]) -> Self {
        let mut stats = Self {
            count: items.len(),
            ..Self::default()
        };
        for h in items {
            stats.total_market_value += h.market_value;
            stats.total_cost_basis += h.cost_basis;
            stats.total_pnl += h.pnl();
        }
        stats
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferStats {
    pub count: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub total_amount: f64,
}

impl PageStats<Transfer> for TransferStats {
    fn compute(items: &[Transfer]) -> Self {
        let mut stats = Self {
            count: items.len(),
            ..Self::default()
        };
        for t in items {
            match t.status {
                ReviewStatus::Pending => stats.pending += 1,
                ReviewStatus::Approved => stats.approved += 1,
                ReviewStatus::Rejected => stats.rejected += 1,
            }
            stats.total_amount += t.amount;
        }
        stats
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubscriptionStats {
    pub count: usize,
    pub pending: usize,
    pub approved: usize,
    pub total_amount: f64,
}

impl PageStats<Subscription> for SubscriptionStats {
    fn compute(items: &[Subscription]) -> Self {
        let mut stats = Self {
            count: items.len(),
            ..Self::default()
        };
        for s in items {
            match s.status {
                ReviewStatus::Pending => stats.pending += 1,
                ReviewStatus::Approved => stats.approved += 1,
                ReviewStatus::Rejected => {}
            }
            stats.total_amount += s.amount;
        }
        stats
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationStats {
    pub count: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl PageStats<ServiceApplication> for ApplicationStats {
    fn compute(items: &[ServiceApplication]) -> Self {
        let mut stats = Self {
            count: items.len(),
            ..Self::default()
        };
        for a in items {
            match a.status {
                ReviewStatus::Pending => stats.pending += 1,
                ReviewStatus::Approved => stats.approved += 1,
                ReviewStatus::Rejected => stats.rejected += 1,
            }
        }
        stats
    }
}
