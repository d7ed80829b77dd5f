use serde::{Deserialize, Serialize};

/// Subject rows per page in the planning view.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Page numbers below 1 clamp to 1; a zero page size falls back to the default.
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page: page.max(1),
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
        }
    }
}

/// Pagination metadata returned alongside a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub page: usize,
    pub page_size: usize,
    pub total_entries: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

/// One page of entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub info: PageInfo,
}

/// Slice `entries` into the requested page. Pages past the end are empty.
pub fn paginate<T>(entries: Vec<T>, request: &PageRequest) -> Page<T> {
    let request = PageRequest::new(request.page, request.page_size);
    let total_entries = entries.len();
    let total_pages = total_entries.div_ceil(request.page_size);
    let from = (request.page - 1).saturating_mul(request.page_size);

    let items: Vec<T> = entries
        .into_iter()
        .skip(from)
        .take(request.page_size)
        .collect();

    Page {
        items,
        info: PageInfo {
            page: request.page,
            page_size: request.page_size,
            total_entries,
            total_pages,
            has_next: request.page < total_pages,
            has_prev: request.page > 1,
        },
    }
}
