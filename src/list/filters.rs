/// Sentinel filter value meaning "do not constrain this key".
pub const ALL: &str = "all";

/// Named filter keys mapped to scalar values.
///
/// Insertion order is preserved so query strings stay stable between
/// requests. Values equal to [`ALL`] (or blank) stay in the map for the UI's
/// sake but are omitted from the outgoing query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    entries: Vec<(String, String)>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the stored value actually changed. Callers reset
    /// the page to 1 on any change; `ListView::set_filter` does this.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == key) {
            if entry.1 == value {
                return false;
            }
            entry.1 = value;
            return true;
        }
        self.entries.push((key.to_string(), value));
        true
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(k, _)| k != key);
        self.entries.len() != before
    }

    /// Active filters only: the `"all"` sentinel and blank values are
    /// omitted from the query.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter(|(_, v)| !v.trim().is_empty() && v.as_str() != ALL)
            .cloned()
            .collect()
    }
}

/// Everything one list request needs: page, limit and the active filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub filters: FilterState,
}

impl ListQuery {
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        pairs.extend(self.filters.query_pairs());
        pairs
    }
}
