//! Pagination types for list endpoints.
//!
//! Every list endpoint takes a zero-based `page_number` and an optional
//! `page_size`, and answers with `{data, page, has_next_page}`. The
//! `has_next_page` flag is computed by fetching one row more than the page
//! size, which avoids a separate COUNT query on every list call.

use serde::{Deserialize, Serialize};

/// Default page size applied when the caller omits `page_size`.
const DEFAULT_PAGE_SIZE: i64 = 25;
/// Maximum page size.
const MAX_PAGE_SIZE: i64 = 100;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (zero-based).
    #[serde(default)]
    pub page_number: i64,
    /// Number of items per page.
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

impl PageRequest {
    /// Create a new page request, clamping the page size into range.
    pub fn new(page_number: i64, page_size: i64) -> Self {
        Self {
            page_number: page_number.max(0),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Calculate the SQL `OFFSET` value.
    pub fn offset(&self) -> i64 {
        self.page_number * self.page_size
    }

    /// The SQL `LIMIT` value: one more row than the page size, so the
    /// presence of a following page can be detected without counting.
    pub fn fetch_limit(&self) -> i64 {
        self.page_size + 1
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items on this page.
    pub data: Vec<T>,
    /// Current page number (zero-based).
    pub page: i64,
    /// Whether a following page exists.
    pub has_next_page: bool,
}

impl<T> PageResponse<T> {
    /// Build a response from rows fetched with [`PageRequest::fetch_limit`],
    /// trimming the over-fetched row.
    pub fn from_rows(mut rows: Vec<T>, request: &PageRequest) -> Self {
        let has_next_page = rows.len() as i64 > request.page_size;
        rows.truncate(request.page_size as usize);
        Self {
            data: rows,
            page: request.page_number,
            has_next_page,
        }
    }

    /// Map the item type, keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            data: self.data.into_iter().map(f).collect(),
            page: self.page,
            has_next_page: self.has_next_page,
        }
    }
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}
