//! Offset-based pagination primitives.

use serde::{Deserialize, Serialize};

/// Hard cap on page size; larger values are clamped, not rejected.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Page size used when the client does not ask for one.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Normalized pagination input: `page` is 1-based, `limit` is 1..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    page: u64,
    limit: u64,
}

impl PageParams {
    /// Normalize raw query values: page floors at 1, limit clamps to 1..=100.
    pub fn new(page: Option<u64>, limit: Option<u64>) -> Self {
        let page = page.unwrap_or(1).max(1);
        let limit = limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        Self { page, limit }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Rows to skip: `(page - 1) * limit`.
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Pagination block returned alongside list payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl Pagination {
    /// `total_pages = ceil(total / limit)`.
    pub fn new(params: PageParams, total: u64) -> Self {
        Self {
            page: params.page(),
            limit: params.limit(),
            total,
            total_pages: total.div_ceil(params.limit()),
        }
    }
}

/// One page of records plus its pagination block.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub records: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    pub fn new(records: Vec<T>, params: PageParams, total: u64) -> Self {
        Self {
            records,
            pagination: Pagination::new(params, total),
        }
    }

    /// Map the record type while keeping the pagination block.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            records: self.records.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_normalize_defaults() {
        let p = PageParams::new(None, None);
        assert_eq!(p.page(), 1);
        assert_eq!(p.limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn params_clamp_out_of_range() {
        let p = PageParams::new(Some(0), Some(0));
        assert_eq!(p.page(), 1);
        assert_eq!(p.limit(), 1);

        let p = PageParams::new(Some(3), Some(1000));
        assert_eq!(p.limit(), MAX_PAGE_SIZE);
        assert_eq!(p.offset(), 2 * MAX_PAGE_SIZE);
    }

    #[test]
    fn total_pages_is_ceiling() {
        let params = PageParams::new(Some(1), Some(10));
        assert_eq!(Pagination::new(params, 0).total_pages, 0);
        assert_eq!(Pagination::new(params, 10).total_pages, 1);
        assert_eq!(Pagination::new(params, 11).total_pages, 2);
        assert_eq!(Pagination::new(params, 100).total_pages, 10);
    }

    #[test]
    fn page_map_keeps_pagination() {
        let page = Page::new(vec![1, 2, 3], PageParams::new(Some(2), Some(3)), 7);
        let mapped = page.map(|n| n.to_string());
        assert_eq!(mapped.records, vec!["1", "2", "3"]);
        assert_eq!(mapped.pagination.page, 2);
        assert_eq!(mapped.pagination.total_pages, 3);
    }
}
