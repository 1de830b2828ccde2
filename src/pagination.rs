// ABOUTME: Page-number pagination parameters and response envelope
// ABOUTME: Builds next/previous links preserving filter query parameters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Mealshare

use serde::{Deserialize, Serialize};

/// Default page size for recipe listings
pub const DEFAULT_PAGE_SIZE: i64 = 6;
/// Upper bound on caller-supplied page sizes
pub const MAX_PAGE_SIZE: i64 = 100;

/// Page-number pagination parameters, 1-based
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PaginationParams {
    /// Page number, starting at 1
    pub page: Option<i64>,
    /// Page size
    pub limit: Option<i64>,
}

impl PaginationParams {
    /// Effective page number (>= 1)
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Effective page size, clamped to [1, `MAX_PAGE_SIZE`]
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    /// Row offset for the effective page
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}

/// Paginated response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of matching items
    pub count: i64,
    /// Link to the next page, if any
    pub next: Option<String>,
    /// Link to the previous page, if any
    pub previous: Option<String>,
    /// Items on this page
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Build a page envelope with next/previous links.
    ///
    /// `extra` carries the caller's filter parameters so links reproduce
    /// the original query; values are percent-encoded.
    #[must_use]
    pub fn new(
        path: &str,
        extra: &[(&str, String)],
        params: &PaginationParams,
        count: i64,
        results: Vec<T>,
    ) -> Self {
        let page = params.page();
        let limit = params.limit();
        let has_next = page * limit < count;
        let has_previous = page > 1;

        Self {
            count,
            next: has_next.then(|| page_link(path, extra, page + 1, limit)),
            previous: has_previous.then(|| page_link(path, extra, page - 1, limit)),
            results,
        }
    }
}

/// Render a page link like `/api/recipes?author=...&page=2&limit=6`
fn page_link(path: &str, extra: &[(&str, String)], page: i64, limit: i64) -> String {
    let mut query: Vec<String> = extra
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect();
    query.push(format!("page={page}"));
    query.push(format!("limit={limit}"));
    format!("{path}?{}", query.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_clamping() {
        let params = PaginationParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(params.offset(), 0);

        let params = PaginationParams {
            page: Some(0),
            limit: Some(10_000),
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_page_links() {
        let params = PaginationParams {
            page: Some(2),
            limit: Some(2),
        };
        let page: Page<i32> = Page::new("/api/recipes", &[], &params, 5, vec![3, 4]);

        assert_eq!(page.count, 5);
        assert_eq!(page.next.as_deref(), Some("/api/recipes?page=3&limit=2"));
        assert_eq!(
            page.previous.as_deref(),
            Some("/api/recipes?page=1&limit=2")
        );
    }

    #[test]
    fn test_extra_params_are_encoded() {
        let params = PaginationParams {
            page: Some(1),
            limit: Some(1),
        };
        let page: Page<i32> =
            Page::new("/api/recipes", &[("tags", "fast food".to_owned())], &params, 2, vec![1]);

        assert_eq!(
            page.next.as_deref(),
            Some("/api/recipes?tags=fast%20food&page=2&limit=1")
        );
        assert!(page.previous.is_none());
    }
}
