//! Pagination arithmetic.

use std::ops::Range;

use escrow_lib::api::PageMeta;

/// The pagination tuple a pager displays.
///
/// `page` is 1-based. `start_item` and `end_item` are 1-based row positions
/// of the current page, both `0` when the page holds no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub page: usize,
    pub rows_per_page: usize,
    pub total_rows: usize,
    pub total_pages: usize,
    pub start_item: usize,
    pub end_item: usize,
}

impl PaginationState {
    /// Computes pagination for `total_rows` rows.
    ///
    /// The page is taken as given: a page past the end (or page `0`) yields
    /// an empty range rather than being clamped. A zero page size counts as
    /// one.
    pub fn compute(page: usize, rows_per_page: usize, total_rows: usize) -> Self {
        let rows_per_page = rows_per_page.max(1);
        let total_pages = total_rows.div_ceil(rows_per_page);
        Self::with_total_pages(page, rows_per_page, total_rows, total_pages)
    }

    /// Pagination as reported by a list endpoint.
    ///
    /// The server's page number is zero-based and its page count is taken as
    /// authoritative.
    pub fn from_server(meta: &PageMeta) -> Self {
        Self::with_total_pages(
            meta.number + 1,
            meta.size.max(1),
            meta.total_elements,
            meta.total_pages,
        )
    }

    fn with_total_pages(
        page: usize,
        rows_per_page: usize,
        total_rows: usize,
        total_pages: usize,
    ) -> Self {
        let range = Self::range_for(page, rows_per_page, total_rows);
        let (start_item, end_item) = if range.is_empty() {
            (0, 0)
        } else {
            (range.start + 1, range.end)
        };

        Self {
            page,
            rows_per_page,
            total_rows,
            total_pages,
            start_item,
            end_item,
        }
    }

    fn range_for(page: usize, rows_per_page: usize, total_rows: usize) -> Range<usize> {
        if page == 0 {
            return 0..0;
        }
        let start = (page - 1).saturating_mul(rows_per_page).min(total_rows);
        let end = page.saturating_mul(rows_per_page).min(total_rows);
        start..end
    }

    /// Index range of the current page within the full row list.
    pub fn slice_range(&self) -> Range<usize> {
        Self::range_for(self.page, self.rows_per_page, self.total_rows)
    }

    /// Clamps a requested page into `[1, max(1, total_pages)]`.
    ///
    /// The engine never clamps; pagers call this before changing page.
    pub fn clamp_page(&self, page: usize) -> usize {
        page.clamp(1, self.total_pages.max(1))
    }

    /// Returns `true` if the current page lies past the last row.
    pub fn is_out_of_range(&self) -> bool {
        self.page == 0 || self.page > self.total_pages.max(1)
    }

    /// Returns `true` if a later page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Returns `true` if an earlier page exists.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_partial_page() {
        let state = PaginationState::compute(3, 20, 45);
        assert_eq!(state.start_item, 41);
        assert_eq!(state.end_item, 45);
        assert_eq!(state.total_pages, 3);
        assert_eq!(state.slice_range(), 40..45);
    }

    #[test]
    fn test_empty_collection() {
        let state = PaginationState::compute(1, 20, 0);
        assert_eq!(state.total_pages, 0);
        assert_eq!(state.start_item, 0);
        assert_eq!(state.end_item, 0);
        assert!(!state.is_out_of_range());
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let state = PaginationState::compute(4, 20, 55);
        assert_eq!(state.total_pages, 3);
        assert!(state.slice_range().is_empty());
        assert_eq!((state.start_item, state.end_item), (0, 0));
        assert!(state.is_out_of_range());
        assert_eq!(state.clamp_page(4), 3);
        assert_eq!(state.clamp_page(0), 1);
    }

    #[test]
    fn test_from_server_is_one_based() {
        let meta = PageMeta {
            size: 20,
            number: 1,
            total_elements: 45,
            total_pages: 3,
        };
        let state = PaginationState::from_server(&meta);
        assert_eq!(state.page, 2);
        assert_eq!(state.start_item, 21);
        assert_eq!(state.end_item, 40);
        assert!(state.has_next());
        assert!(state.has_previous());
    }
}
