use crate::api::types::PaginationMeta;

/// Pagination state for one list view.
///
/// `page`/`limit` are what the user asked for; `total`/`total_pages` are
/// whatever the last server response reported, replaced wholesale on every
/// fetch. Out-of-range page requests clamp rather than error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    page: u32,
    limit: u32,
    total: u64,
    total_pages: u32,
}

impl Pager {
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            total: 0,
            total_pages: 0,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Clamped to `[1, max(total_pages, 1)]`. Returns true when the page
    /// changed, i.e. a re-fetch is due.
    pub fn set_page(&mut self, page: u32) -> bool {
        let clamped = page.clamp(1, self.total_pages.max(1));
        if clamped == self.page {
            return false;
        }
        self.page = clamped;
        true
    }

    /// Changing the page size restarts from page 1.
    pub fn set_limit(&mut self, limit: u32) -> bool {
        let limit = limit.max(1);
        if limit == self.limit && self.page == 1 {
            return false;
        }
        self.limit = limit;
        self.page = 1;
        true
    }

    /// Any filter mutation other than the page selector itself lands here.
    pub fn reset_page(&mut self) {
        self.page = 1;
    }

    /// Reconcile against the metadata of the latest response. The server's
    /// echoed page/limit are adopted (it may have clamped them); a shrunken
    /// result set pulls the page back into range.
    pub fn update_from_meta(&mut self, meta: &PaginationMeta) {
        self.total = meta.total;
        self.total_pages = meta.total_pages;
        self.limit = meta.limit.max(1);
        self.page = meta.page.clamp(1, self.total_pages.max(1));
    }

    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages.max(1))
    }
}
