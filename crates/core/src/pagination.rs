//! Pagination window math and the shared page envelope.
//!
//! This module lives in `core` (zero internal deps) so the repository layer
//! and the API surface agree on the same clamping and ceiling rules.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum number of items per page.
pub const MAX_PAGE_SIZE: i64 = 100;

// ---------------------------------------------------------------------------
// Clamping helpers
// ---------------------------------------------------------------------------

/// Clamp a user-provided 1-based page number to a minimum of 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Clamp a user-provided page size to valid bounds.
pub fn clamp_page_size(page_size: Option<i64>, default: i64, max: i64) -> i64 {
    page_size.unwrap_or(default).max(1).min(max)
}

/// Zero-based row offset of the window for `page` at `page_size` per page.
pub fn page_offset(page: i64, page_size: i64) -> i64 {
    (page - 1) * page_size
}

/// Total number of pages needed for `total_count` items at `page_size` per
/// page: `ceil(total_count / page_size)`.
pub fn total_pages(total_count: i64, page_size: i64) -> i64 {
    (total_count + page_size - 1) / page_size
}

// ---------------------------------------------------------------------------
// Page envelope
// ---------------------------------------------------------------------------

/// A windowed subset of an ordered result set plus the metadata needed to
/// compute further pages.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub current_page: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl<T> Page<T> {
    /// Assemble a page envelope from a fetched window and the total row count.
    ///
    /// A `current_page` past the last page is not an error: the item list is
    /// empty while the totals still describe the full result set.
    pub fn new(items: Vec<T>, total_count: i64, current_page: i64, page_size: i64) -> Self {
        let total_pages = total_pages(total_count, page_size);
        Self {
            has_previous_page: current_page > 1,
            has_next_page: current_page < total_pages,
            items,
            total_count,
            current_page,
            page_size,
            total_pages,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- clamp_page ----------------------------------------------------------

    #[test]
    fn clamp_page_defaults_to_one() {
        assert_eq!(clamp_page(None), 1);
    }

    #[test]
    fn clamp_page_floors_at_one() {
        assert_eq!(clamp_page(Some(0)), 1);
        assert_eq!(clamp_page(Some(-3)), 1);
    }

    #[test]
    fn clamp_page_passes_through_valid_value() {
        assert_eq!(clamp_page(Some(7)), 7);
    }

    // -- clamp_page_size -----------------------------------------------------

    #[test]
    fn clamp_page_size_uses_default_when_none() {
        assert_eq!(clamp_page_size(None, 10, 100), 10);
    }

    #[test]
    fn clamp_page_size_respects_max() {
        assert_eq!(clamp_page_size(Some(500), 10, 100), 100);
    }

    #[test]
    fn clamp_page_size_floors_at_one() {
        assert_eq!(clamp_page_size(Some(0), 10, 100), 1);
        assert_eq!(clamp_page_size(Some(-5), 10, 100), 1);
    }

    // -- window math ---------------------------------------------------------

    #[test]
    fn offset_of_first_page_is_zero() {
        assert_eq!(page_offset(1, 10), 0);
    }

    #[test]
    fn offset_skips_preceding_pages() {
        assert_eq!(page_offset(3, 10), 20);
        assert_eq!(page_offset(2, 25), 25);
    }

    #[test]
    fn total_pages_is_ceiling_division() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(95, 10), 10);
    }

    /// Page windows of size S partition N items: the first `total_pages - 1`
    /// pages are full and the last page holds the remainder (or S when it
    /// divides evenly).
    #[test]
    fn page_windows_partition_the_result_set() {
        for (n, s) in [(0i64, 1i64), (1, 3), (9, 3), (10, 3), (95, 10), (100, 100)] {
            let pages = total_pages(n, s);
            let mut counted = 0;
            for page in 1..=pages {
                let offset = page_offset(page, s);
                let window = s.min(n - offset);
                if page < pages {
                    assert_eq!(window, s, "page {page} of N={n} S={s} should be full");
                }
                counted += window;
            }
            assert_eq!(counted, n, "windows must sum to N for N={n} S={s}");
        }
    }

    // -- Page envelope -------------------------------------------------------

    #[test]
    fn first_page_has_no_previous() {
        let page = Page::new(vec![1, 2, 3], 9, 1, 3);
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_previous_page);
        assert!(page.has_next_page);
    }

    #[test]
    fn middle_page_has_both_neighbours() {
        let page = Page::new(vec![4, 5, 6], 9, 2, 3);
        assert!(page.has_previous_page);
        assert!(page.has_next_page);
    }

    #[test]
    fn last_page_has_no_next() {
        let page = Page::new(vec![7, 8, 9], 9, 3, 3);
        assert!(page.has_previous_page);
        assert!(!page.has_next_page);
    }

    #[test]
    fn page_past_the_end_is_empty_not_an_error() {
        let page: Page<i32> = Page::new(vec![], 9, 5, 3);
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 9);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_previous_page);
        assert!(!page.has_next_page);
    }

    #[test]
    fn empty_result_set_has_zero_pages() {
        let page: Page<i32> = Page::new(vec![], 0, 1, 10);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_previous_page);
        assert!(!page.has_next_page);
    }
}
