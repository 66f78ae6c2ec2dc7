use async_trait::async_trait;

use crate::api::types::PageEnvelope;
use crate::core::AppError;
use crate::list::filters::{FilterState, ListQuery};
use crate::list::pager::Pager;

/// One page-shaped read against the backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageFetcher<T: Send + Sync + 'static>: Send + Sync {
    async fn fetch_page(&self, query: &ListQuery) -> Result<PageEnvelope<T>, AppError>;
}

/// Aggregate numbers recomputed from the page just received.
///
/// These cover the current page only, not the full result set.
pub trait PageStats<T>: Default {
    fn compute(items: &[T]) -> Self;
}

/// No-op stats for lists with nothing worth summing.
impl<T> PageStats<T> for () {
    fn compute(_items: &[T]) -> Self {}
}

/// Bare record count, for lists without currency or status fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageCount {
    pub count: usize,
}

impl<T> PageStats<T> for PageCount {
    fn compute(items: &[T]) -> Self {
        Self { count: items.len() }
    }
}

/// Ticket for one in-flight fetch. Tickets are strictly increasing;
/// responses carrying an out-of-date ticket are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// State half of a list page: items, pagination, filters, page-local stats.
///
/// Mutators (`set_page`, `set_limit`, `set_filter`) touch state only and
/// report whether a re-fetch is due; `sync` is the I/O half. Keeping the two
/// apart is what makes this testable without a backend.
///
/// Overlapping fetches are resolved by ticket: the response for the newest
/// issued request wins, and anything older is discarded instead of letting
/// whichever promise resolves last overwrite state.
#[derive(Debug)]
pub struct ListView<T, S: PageStats<T>> {
    pager: Pager,
    filters: FilterState,
    items: Vec<T>,
    stats: S,
    loading: bool,
    last_error: Option<String>,
    issued: u64,
    applied: u64,
}

impl<T, S: PageStats<T>> ListView<T, S> {
    pub fn new(limit: u32) -> Self {
        Self {
            pager: Pager::new(limit),
            filters: FilterState::new(),
            items: Vec::new(),
            stats: S::default(),
            loading: false,
            last_error: None,
            issued: 0,
            applied: 0,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn stats(&self) -> &S {
        &self.stats
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Returns true when the page changed and a re-fetch is due.
    pub fn set_page(&mut self, page: u32) -> bool {
        self.pager.set_page(page)
    }

    /// Returns true when the limit changed; the page resets to 1.
    pub fn set_limit(&mut self, limit: u32) -> bool {
        self.pager.set_limit(limit)
    }

    /// Any filter change other than the page selector resets the page to 1.
    pub fn set_filter(&mut self, key: &str, value: impl Into<String>) -> bool {
        let changed = self.filters.set(key, value);
        if changed {
            self.pager.reset_page();
        }
        changed
    }

    pub fn query(&self) -> ListQuery {
        ListQuery {
            page: self.pager.page(),
            limit: self.pager.limit(),
            filters: self.filters.clone(),
        }
    }

    /// Mark a fetch as started and take a ticket for it.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.loading = true;
        self.issued += 1;
        FetchTicket(self.issued)
    }

    /// Apply one fetch outcome. Returns true when the page was replaced.
    ///
    /// On success the items, stats and pagination metadata are replaced
    /// wholesale. On error the list is left stale and only `last_error`
    /// changes. Either way the loading flag clears once the newest ticket
    /// has resolved, so the view never sticks in a spinner state.
    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        result: Result<PageEnvelope<T>, AppError>,
    ) -> bool {
        if ticket.0 == self.issued {
            self.loading = false;
        }
        match result {
            Ok(envelope) => {
                if ticket.0 < self.issued || ticket.0 <= self.applied {
                    // Superseded by a newer request; drop it.
                    return false;
                }
                self.applied = ticket.0;
                self.pager.update_from_meta(&envelope.meta());
                self.stats = S::compute(&envelope.data);
                self.items = envelope.data;
                self.last_error = None;
                true
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                false
            }
        }
    }

    /// Issue exactly one request for the current page/filters and apply it.
    pub async fn sync<F>(&mut self, fetcher: &F) -> bool
    where
        F: PageFetcher<T> + ?Sized,
        T: Send + Sync + 'static,
    {
        let query = self.query();
        let ticket = self.begin_fetch();
        let result = fetcher.fetch_page(&query).await;
        self.apply(ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Holding, HoldingStats};

    fn holding(id: &str, market_value: f64) -> Holding {
        Holding {
            id: id.to_string(),
            customer_id: "c-1".to_string(),
            symbol: "ACME".to_string(),
            shares: 1.0,
            cost_basis: 100.0,
            market_value,
        }
    }

    fn page(items: Vec<Holding>, total: u64, page: u32, limit: u32) -> PageEnvelope<Holding> {
        PageEnvelope {
            data: items,
            total,
            page,
            limit,
            total_pages: None,
        }
    }

    fn view() -> ListView<Holding, HoldingStats> {
        ListView::new(10)
    }

    #[test]
    fn successful_fetch_replaces_items_and_stats() {
        let mut view = view();
        let ticket = view.begin_fetch();
        assert!(view.is_loading());

        let applied = view.apply(
            ticket,
            Ok(page(vec![holding("h-1", 150.0), holding("h-2", 250.0)], 2, 1, 10)),
        );
        assert!(applied);
        assert!(!view.is_loading());
        assert_eq!(view.items().len(), 2);
        assert_eq!(view.stats().total_market_value, 400.0);
        assert_eq!(view.pager().label(), "Page 1 of 1");
        assert!(view.last_error().is_none());
    }

    #[test]
    fn failed_fetch_leaves_list_stale_and_clears_loading() {
        let mut view = view();
        let ticket = view.begin_fetch();
        view.apply(ticket, Ok(page(vec![holding("h-1", 150.0)], 1, 1, 10)));

        let ticket = view.begin_fetch();
        let applied = view.apply(ticket, Err(AppError::Api("backend down".to_string())));
        assert!(!applied);
        assert!(!view.is_loading());
        assert_eq!(view.items().len(), 1);
        assert_eq!(view.last_error(), Some("Admin API error: backend down"));
    }

    #[test]
    fn stale_response_is_dropped() {
        let mut view = view();
        let old_ticket = view.begin_fetch();
        let new_ticket = view.begin_fetch();

        assert!(view.apply(new_ticket, Ok(page(vec![holding("new", 1.0)], 1, 1, 10))));
        // The slower, older response arrives afterwards and must not win.
        assert!(!view.apply(old_ticket, Ok(page(vec![holding("old", 9.0)], 1, 1, 10))));
        assert_eq!(view.items()[0].id, "new");
    }

    #[test]
    fn older_response_before_newer_is_also_dropped() {
        let mut view = view();
        let old_ticket = view.begin_fetch();
        let _new_ticket = view.begin_fetch();

        // Older response resolves first while a newer request is in flight.
        assert!(!view.apply(old_ticket, Ok(page(vec![holding("old", 9.0)], 1, 1, 10))));
        assert!(view.items().is_empty());
        // Still loading: the newest ticket has not resolved yet.
        assert!(view.is_loading());
    }

    #[test]
    fn filter_change_resets_page() {
        let mut view = view();
        let ticket = view.begin_fetch();
        view.apply(ticket, Ok(page(Vec::new(), 47, 3, 10)));
        assert_eq!(view.pager().page(), 3);

        assert!(view.set_filter("status", "pending"));
        assert_eq!(view.pager().page(), 1);

        // Unchanged value: no reset, no re-fetch due.
        let ticket = view.begin_fetch();
        view.apply(ticket, Ok(page(Vec::new(), 47, 2, 10)));
        assert!(!view.set_filter("status", "pending"));
        assert_eq!(view.pager().page(), 2);
    }

    #[tokio::test]
    async fn sync_issues_exactly_one_request_with_current_query() {
        let mut view = view();
        view.set_filter("customer_id", "c-9");

        let mut fetcher = MockPageFetcher::<Holding>::new();
        fetcher
            .expect_fetch_page()
            .withf(|q: &ListQuery| {
                q.page == 1 && q.query_pairs().contains(&("customer_id".to_string(), "c-9".to_string()))
            })
            .times(1)
            .returning(|_| Ok(PageEnvelope {
                data: vec![],
                total: 0,
                page: 1,
                limit: 10,
                total_pages: None,
            }));

        assert!(view.sync(&fetcher).await);
    }
}
