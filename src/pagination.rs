// ABOUTME: Page-number pagination for list endpoints
// ABOUTME: Query parameters plus the count/next/previous/results envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Foodgram

//! Page-number pagination with a bounded page size

use crate::constants::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use serde::{Deserialize, Serialize};

/// Pagination query parameters accepted by list endpoints
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PaginationParams {
    /// 1-based page number
    pub page: Option<u32>,
    /// Requested page size
    pub limit: Option<u32>,
}

impl PaginationParams {
    /// Effective 1-based page number
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Effective page size, clamped to the configured maximum
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    /// Row offset for the effective page
    #[must_use]
    pub fn offset(&self) -> u32 {
        (self.page() - 1) * self.limit()
    }
}

/// Paginated response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of rows matching the query
    pub count: u64,
    /// Absolute URL of the next page, if any
    pub next: Option<String>,
    /// Absolute URL of the previous page, if any
    pub previous: Option<String>,
    /// Rows for the current page
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Build a page envelope with next/previous links derived from the
    /// endpoint URL and the total row count
    #[must_use]
    pub fn new(results: Vec<T>, count: u64, params: &PaginationParams, endpoint_url: &str) -> Self {
        let page = params.page();
        let limit = params.limit();
        let total_pages = count.div_ceil(u64::from(limit));

        let next = if u64::from(page) < total_pages {
            Some(format!("{endpoint_url}?page={}&limit={limit}", page + 1))
        } else {
            None
        };
        let previous = if page > 1 {
            Some(format!("{endpoint_url}?page={}&limit={limit}", page - 1))
        } else {
            None
        };

        Self {
            count,
            next,
            previous,
            results,
        }
    }
}
