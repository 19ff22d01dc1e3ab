//! Pagination utilities for paper listings

/// Page size used when the client does not send one
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Largest page size a client may request
pub const MAX_PAGE_SIZE: i64 = 100;

/// Pagination metadata calculated from total results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: usize,
    /// Effective page size after clamping
    pub page_size: usize,
    /// Total number of pages
    pub total_pages: usize,
    /// Index of the first result on this page
    pub offset: usize,
}

impl Pagination {
    /// Range of result indices covered by this page, clipped to `total`
    pub fn range(&self, total: usize) -> std::ops::Range<usize> {
        let start = self.offset.min(total);
        let end = self.offset.saturating_add(self.page_size).min(total);
        start..end
    }
}

/// Calculate pagination metadata from total results and requested page
///
/// Page is clamped to at least 1 and page size to [1, MAX_PAGE_SIZE]. A page
/// past the end is kept as requested and simply yields no results.
///
/// # Examples
/// ```
/// use papers_api::pagination::calculate_pagination;
///
/// // 250 total results at 100 per page = 3 pages (100 + 100 + 50)
/// let p = calculate_pagination(250, 2, 100);
/// assert_eq!(p.page, 2);
/// assert_eq!(p.total_pages, 3);
/// assert_eq!(p.offset, 100);
///
/// // Out-of-range page stays out of range
/// let p = calculate_pagination(250, 9, 100);
/// assert_eq!(p.page, 9);
/// assert!(p.range(250).is_empty());
/// ```
pub fn calculate_pagination(total_results: usize, requested_page: i64, requested_size: i64) -> Pagination {
    let page_size = requested_size.clamp(1, MAX_PAGE_SIZE) as usize;
    let page = requested_page.max(1) as usize;
    let total_pages = total_results.div_ceil(page_size);
    let offset = (page - 1).saturating_mul(page_size);

    Pagination {
        page,
        page_size,
        total_pages,
        offset,
    }
}
