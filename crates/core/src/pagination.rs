//! Page-number pagination for list endpoints.
//!
//! Query strings arrive as raw text; anything unparseable falls back to the
//! defaults instead of failing the request. Pages past the end simply
//! produce an empty item list.

use serde::Serialize;

/// Default page size.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Build from raw `page` / `limit` query values.
    ///
    /// - page: unparseable or < 1 becomes 1.
    /// - limit: unparseable or < 1 becomes [`DEFAULT_PAGE_SIZE`]. Larger
    ///   values are honoured as given.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = page
            .and_then(|p| p.trim().parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);
        let limit = limit
            .and_then(|l| l.trim().parse::<i64>().ok())
            .filter(|l| *l >= 1)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        Self { page, limit }
    }

    /// Row offset for SQL `OFFSET`.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Pagination metadata flattened into list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    /// Number of rows matching the filters, ignoring the page window.
    pub total: i64,
    pub pages: i64,
    pub current_page: i64,
}

impl PageMeta {
    pub fn new(total: i64, request: PageRequest) -> Self {
        let total = total.max(0);
        Self {
            total,
            pages: (total + request.limit - 1) / request.limit,
            current_page: request.page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_absent() {
        assert_eq!(PageRequest::from_raw(None, None), PageRequest::default());
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let req = PageRequest::from_raw(Some("two"), Some("lots"));
        assert_eq!(req, PageRequest { page: 1, limit: 10 });
    }

    #[test]
    fn non_positive_values_are_clamped() {
        assert_eq!(PageRequest::from_raw(Some("0"), Some("-5")), PageRequest { page: 1, limit: 10 });
    }

    #[test]
    fn large_limit_is_kept_for_page_count() {
        let req = PageRequest::from_raw(Some("1"), Some("200"));
        assert_eq!(req.limit, 200);
        assert_eq!(PageMeta::new(150, req).pages, 1);
    }

    #[test]
    fn offset_from_page_and_limit() {
        assert_eq!(PageRequest { page: 1, limit: 10 }.offset(), 0);
        assert_eq!(PageRequest { page: 4, limit: 25 }.offset(), 75);
    }

    #[test]
    fn page_count_rounds_up() {
        let req = PageRequest { page: 2, limit: 10 };
        assert_eq!(PageMeta::new(0, req).pages, 0);
        assert_eq!(PageMeta::new(10, req).pages, 1);
        assert_eq!(PageMeta::new(11, req).pages, 2);
    }

    #[test]
    fn meta_echoes_requested_page_and_full_total() {
        for limit in [1, 3, 10, 50] {
            for page in [1, 2, 7] {
                let req = PageRequest { page, limit };
                let meta = PageMeta::new(23, req);
                assert_eq!(meta.current_page, page);
                assert_eq!(meta.total, 23);
            }
        }
    }
}
