//! Pagination query parameter extractor.

use serde::{Deserialize, Serialize};

use pantry_core::types::pagination::PageRequest;

/// Maximum page size a client may request.
const MAX_PAGE_SIZE: i64 = 100;

/// Default page size when the client does not specify one.
const DEFAULT_PAGE_SIZE: i64 = 25;

/// Query parameters for paginated endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (zero-based, default: 0).
    #[serde(default)]
    pub page_number: i64,
    /// Items per page (default: 25, max: 100).
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl PaginationParams {
    /// Converts to a `PageRequest`, clamping out-of-range values.
    pub fn into_page_request(self) -> PageRequest {
        PageRequest {
            page_number: self.page_number.max(0),
            page_size: self.page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }
}
