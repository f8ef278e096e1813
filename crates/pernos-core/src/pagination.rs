//! # Pagination
//!
//! Page requests and paged results for list endpoints.
//!
//! ```rust
//! use pernos_core::pagination::{Page, Pagination};
//!
//! let request = Pagination::new(Some(3), 10);
//! assert_eq!(request.offset(), 20);
//!
//! let page = Page::new(vec!["a", "b"], request, 22);
//! assert_eq!(page.total_pages, 3);
//! ```

use serde::{Deserialize, Serialize};

/// Upper bound for a requested page size.
pub const MAX_PER_PAGE: i64 = 100;

/// A request for one page (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
}

impl Pagination {
    /// Builds a request; missing, zero or negative pages clamp to 1.
    pub fn new(page: Option<i64>, per_page: i64) -> Self {
        Pagination {
            page: page.filter(|p| *p >= 1).unwrap_or(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Rows to skip.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// Rows to fetch.
    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination::new(None, 10)
    }
}

/// One page of results plus the totals a pager needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: Pagination, total: i64) -> Self {
        let total = total.max(0);
        Page {
            items,
            page: request.page,
            per_page: request.per_page,
            total,
            total_pages: (total + request.per_page - 1) / request.per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_clamping() {
        assert_eq!(Pagination::new(None, 10).page, 1);
        assert_eq!(Pagination::new(Some(0), 10).page, 1);
        assert_eq!(Pagination::new(Some(-7), 10).page, 1);
        assert_eq!(Pagination::new(Some(4), 0).per_page, 1);
        assert_eq!(Pagination::new(Some(4), 1000).per_page, MAX_PER_PAGE);
    }

    #[test]
    fn test_offset() {
        assert_eq!(Pagination::new(Some(1), 10).offset(), 0);
        assert_eq!(Pagination::new(Some(5), 10).offset(), 40);
    }

    #[test]
    fn test_total_pages() {
        let req = Pagination::new(Some(1), 10);
        assert_eq!(Page::<i32>::new(vec![], req, 0).total_pages, 0);
        assert_eq!(Page::<i32>::new(vec![], req, 10).total_pages, 1);
        assert_eq!(Page::<i32>::new(vec![], req, 11).total_pages, 2);

        let page = Page::new(vec![1, 2], Pagination::new(Some(2), 10), 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 2);
    }
}
