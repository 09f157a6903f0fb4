//! Page-based pagination types shared by all listing queries.

use serde::Serialize;

/// Default page size for listings.
pub const DEFAULT_PER_PAGE: u64 = 10;

/// Upper bound a client may request per page.
pub const MAX_PER_PAGE: u64 = 100;

/// A 1-based page request.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageRequest {
    /// Normalize raw query parameters: page floors at 1, page size is
    /// clamped to `1..=MAX_PER_PAGE` and defaults to `DEFAULT_PER_PAGE`.
    pub fn new(page: Option<u64>, per_page: Option<u64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE),
        }
    }

    /// Clamp the requested page into the range a result set actually has.
    /// Out-of-range requests land on the last page; an empty result set
    /// still has one (empty) page.
    pub fn clamp_to(&self, total_pages: u64) -> u64 {
        self.page.min(total_pages.max(1))
    }
}

/// One page of results plus the counts clients need to render a pager.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Map the items of the page, keeping the pager counts.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_bounds() {
        let req = PageRequest::new(None, None);
        assert_eq!(req.page, 1);
        assert_eq!(req.per_page, DEFAULT_PER_PAGE);

        let req = PageRequest::new(Some(0), Some(0));
        assert_eq!(req.page, 1);
        assert_eq!(req.per_page, 1);

        let req = PageRequest::new(Some(3), Some(10_000));
        assert_eq!(req.page, 3);
        assert_eq!(req.per_page, MAX_PER_PAGE);
    }

    #[test]
    fn out_of_range_pages_clamp_to_last() {
        let req = PageRequest::new(Some(99), None);
        assert_eq!(req.clamp_to(4), 4);
        assert_eq!(PageRequest::new(Some(2), None).clamp_to(4), 2);
    }

    #[test]
    fn empty_result_set_has_one_page() {
        assert_eq!(PageRequest::new(Some(7), None).clamp_to(0), 1);
    }

    #[test]
    fn map_preserves_counts() {
        let page = Page {
            items: vec![1, 2, 3],
            page: 2,
            per_page: 3,
            total_items: 7,
            total_pages: 3,
        };
        let mapped = page.map(|n| n.to_string());
        assert_eq!(mapped.items, vec!["1", "2", "3"]);
        assert_eq!(mapped.total_pages, 3);
    }
}
