//! Pagination counters and page-number windows.

use serde::{Deserialize, Serialize};

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Width of the page-number window shown by pagination controls.
pub const DEFAULT_VISIBLE_PAGES: usize = 5;

/// Requested page plus the counters of the last query.
///
/// Callers set `page` and `page_size`; [`query`](crate::query) fills in
/// `total` and `total_pages` and reports the page it actually served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    /// 1-indexed page number.
    pub page: usize,
    /// Records per page.
    pub page_size: usize,
    /// Matching records across all pages.
    #[serde(default)]
    pub total: usize,
    /// `ceil(total / page_size)`, zero when nothing matched.
    #[serde(default)]
    pub total_pages: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        PaginationState::new(DEFAULT_PAGE_SIZE)
    }
}

impl PaginationState {
    /// Page 1 with the given page size and no counters yet.
    pub fn new(page_size: usize) -> Self {
        PaginationState {
            page: 1,
            page_size,
            total: 0,
            total_pages: 0,
        }
    }

    /// Same page size, different requested page.
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    /// Builds counters for `total` matches, clamping `page` into range.
    ///
    /// `page_size` must be non-zero; the engine checks this before calling.
    pub(crate) fn resolve(page: usize, page_size: usize, total: usize) -> Self {
        let total_pages = total.div_ceil(page_size);
        PaginationState {
            page: page.clamp(1, total_pages.max(1)),
            page_size,
            total,
            total_pages,
        }
    }

    /// Index of the first record on this page.
    pub fn offset(&self) -> usize {
        (self.page.max(1) - 1) * self.page_size
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous_page(&self) -> bool {
        self.page > 1
    }

    /// 1-based position of the first record shown, or 0 when empty.
    pub fn first_item(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.offset() + 1
        }
    }

    /// 1-based position of the last record shown, or 0 when empty.
    pub fn last_item(&self) -> usize {
        (self.page * self.page_size).min(self.total)
    }

    /// Page-number window around the current page.
    ///
    /// Shows every page when they fit in `max_visible`. Otherwise shows a
    /// window of up to `max_visible` pages starting `max_visible / 2` pages
    /// before the current one, cut short at the last page, plus the first
    /// and last page with a [`PageLink::Gap`] wherever numbers are skipped.
    ///
    /// ```
    /// use backoffice_query::{PageLink, PaginationState};
    ///
    /// let mut p = PaginationState::new(10);
    /// p.total = 200;
    /// p.total_pages = 20;
    /// p.page = 10;
    ///
    /// use PageLink::{Gap, Page};
    /// assert_eq!(
    ///     p.visible_pages(5),
    ///     vec![Page(1), Gap, Page(8), Page(9), Page(10), Page(11), Page(12), Gap, Page(20)]
    /// );
    /// ```
    pub fn visible_pages(&self, max_visible: usize) -> Vec<PageLink> {
        let total = self.total_pages;
        let width = max_visible.max(1);

        if total <= width {
            return (1..=total).map(PageLink::Page).collect();
        }

        let current = self.page.clamp(1, total);
        let start = current.saturating_sub(width / 2).max(1);
        let end = (start + width - 1).min(total);

        let mut links = Vec::with_capacity(width + 4);
        if start > 1 {
            links.push(PageLink::Page(1));
            if start > 2 {
                links.push(PageLink::Gap);
            }
        }
        links.extend((start..=end).map(PageLink::Page));
        if end < total {
            if end + 1 < total {
                links.push(PageLink::Gap);
            }
            links.push(PageLink::Page(total));
        }
        links
    }
}

/// One entry in a page-number window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "type", content = "page")]
pub enum PageLink {
    /// A clickable page number.
    Page(usize),
    /// Skipped page numbers ("…").
    Gap,
}

impl std::fmt::Display for PageLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageLink::Page(n) => write!(f, "{}", n),
            PageLink::Gap => write!(f, "…"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageLink::{Gap, Page};

    fn at(page: usize, total_pages: usize) -> PaginationState {
        PaginationState {
            page,
            page_size: 10,
            total: total_pages * 10,
            total_pages,
        }
    }

    #[test]
    fn resolve_counts_pages() {
        let p = PaginationState::resolve(1, 12, 13);
        assert_eq!(p.total_pages, 2);
        assert_eq!(p.total, 13);

        let exact = PaginationState::resolve(1, 12, 24);
        assert_eq!(exact.total_pages, 2);
    }

    #[test]
    fn resolve_clamps_page() {
        assert_eq!(PaginationState::resolve(5, 12, 13).page, 2);
        assert_eq!(PaginationState::resolve(0, 12, 13).page, 1);
    }

    #[test]
    fn resolve_empty_reports_page_one() {
        let p = PaginationState::resolve(3, 10, 0);
        assert_eq!(p.page, 1);
        assert_eq!(p.total_pages, 0);
        assert_eq!(p.first_item(), 0);
        assert_eq!(p.last_item(), 0);
        assert!(!p.has_next_page());
        assert!(!p.has_previous_page());
    }

    #[test]
    fn item_bounds_for_showing_text() {
        let p = PaginationState::resolve(2, 12, 13);
        assert_eq!(p.first_item(), 13);
        assert_eq!(p.last_item(), 13);
        assert!(p.has_previous_page());
        assert!(!p.has_next_page());

        let first = PaginationState::resolve(1, 12, 13);
        assert_eq!((first.first_item(), first.last_item()), (1, 12));
        assert!(first.has_next_page());
    }

    #[test]
    fn with_page_never_goes_below_one() {
        assert_eq!(PaginationState::new(10).with_page(0).page, 1);
    }

    #[test]
    fn window_lists_everything_when_it_fits() {
        assert_eq!(at(2, 3).visible_pages(5), vec![Page(1), Page(2), Page(3)]);
        assert_eq!(at(1, 0).visible_pages(5), vec![]);
    }

    #[test]
    fn window_at_start() {
        assert_eq!(
            at(1, 10).visible_pages(5),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Gap, Page(10)]
        );
    }

    #[test]
    fn window_narrows_at_end() {
        assert_eq!(
            at(10, 10).visible_pages(5),
            vec![Page(1), Gap, Page(8), Page(9), Page(10)]
        );
        assert_eq!(
            at(9, 10).visible_pages(5),
            vec![Page(1), Gap, Page(7), Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn window_without_gap_when_adjacent() {
        assert_eq!(
            at(4, 7).visible_pages(5),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Page(7)]
        );
    }

    #[test]
    fn page_link_display() {
        assert_eq!(Page(3).to_string(), "3");
        assert_eq!(Gap.to_string(), "…");
    }
}
