//! Caller-owned list state.
//!
//! A list view keeps one [`ListState`] and mutates it as the user types a
//! search, picks a filter, clicks a sort header or a page number. Every
//! change that can shrink the result set sends the view back to page 1.

use serde::{Deserialize, Serialize};

use crate::engine::{query, Page};
use crate::error::Result;
use crate::filter::{FilterState, NumericRange};
use crate::ordering::{Dir, OrderBy};
use crate::pagination::PaginationState;
use crate::schema::Record;

/// Filter and pagination state for one list view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListState {
    pub filter: FilterState,
    pub pagination: PaginationState,
}

impl ListState {
    /// Page 1 of an unfiltered list.
    pub fn new(page_size: usize) -> Self {
        ListState {
            filter: FilterState::default(),
            pagination: PaginationState::new(page_size),
        }
    }

    /// Starts from an existing filter, on page 1.
    pub fn with_filter(mut self, filter: FilterState) -> Self {
        self.filter = filter;
        self.pagination.page = 1;
        self
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.filter.search = query.into();
        self.first_page();
    }

    /// Sets a selection; `"all"` or `""` disables it.
    pub fn select(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.filter.selections.insert(field.into(), value.into());
        self.first_page();
    }

    pub fn clear_selection(&mut self, field: &str) {
        self.filter.selections.remove(field);
        self.first_page();
    }

    pub fn set_range(&mut self, range: Option<NumericRange>) {
        self.filter.range = range;
        self.first_page();
    }

    /// Drops search, selections and range. The sort order is kept.
    pub fn reset_filters(&mut self) {
        let sort = self.filter.sort.take();
        self.filter = FilterState {
            sort,
            ..FilterState::default()
        };
        self.first_page();
    }

    /// Sort-header click: ascending first, then toggles to descending.
    ///
    /// Clicking the active ascending header switches to descending; any
    /// other click sorts ascending by the clicked field.
    pub fn sort_by(&mut self, field: &str) {
        let dir = match &self.filter.sort {
            Some(current) if current.field == field && current.dir.is_asc() => Dir::Desc,
            _ => Dir::Asc,
        };
        self.set_sort(field, dir);
    }

    pub fn set_sort(&mut self, field: impl Into<String>, dir: Dir) {
        self.filter.sort = Some(OrderBy::new(field, dir));
        self.first_page();
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.pagination.page_size = page_size;
        self.first_page();
    }

    /// Requests a page; anything below 1 becomes 1.
    pub fn go_to_page(&mut self, page: usize) {
        self.pagination.page = page.max(1);
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.pagination.page.saturating_add(1));
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.pagination.page.saturating_sub(1));
    }

    /// Takes the counters (and clamped page) of a query result.
    pub fn apply<R>(&mut self, page: &Page<'_, R>) {
        self.pagination = page.pagination;
    }

    /// Queries `records` with this state.
    pub fn run<'a, R: Record>(&self, records: &'a [R]) -> Result<Page<'a, R>> {
        query(records, &self.filter, &self.pagination)
    }

    fn first_page(&mut self) {
        self.pagination.page = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_page(page: usize) -> ListState {
        let mut state = ListState::new(10);
        state.go_to_page(page);
        state
    }

    #[test]
    fn filter_changes_reset_page() {
        let mut state = on_page(3);
        state.set_search("coffee");
        assert_eq!(state.pagination.page, 1);

        let mut state = on_page(3);
        state.select("status", "active");
        assert_eq!(state.pagination.page, 1);

        let mut state = on_page(3);
        state.set_range(Some(NumericRange::new(1.0, 2.0)));
        assert_eq!(state.pagination.page, 1);

        let mut state = on_page(3);
        state.clear_selection("status");
        assert_eq!(state.pagination.page, 1);

        let mut state = on_page(3);
        state.set_page_size(25);
        assert_eq!(state.pagination.page, 1);
        assert_eq!(state.pagination.page_size, 25);
    }

    #[test]
    fn sort_header_toggles() {
        let mut state = ListState::new(10);
        state.sort_by("name");
        assert_eq!(state.filter.sort, Some(OrderBy::asc("name")));

        state.sort_by("name");
        assert_eq!(state.filter.sort, Some(OrderBy::desc("name")));

        state.sort_by("name");
        assert_eq!(state.filter.sort, Some(OrderBy::asc("name")));

        state.sort_by("email");
        assert_eq!(state.filter.sort, Some(OrderBy::asc("email")));
    }

    #[test]
    fn descending_default_sort_flips_to_ascending_on_click() {
        let mut state = ListState::new(10);
        state.set_sort("created_at", Dir::Desc);
        state.sort_by("created_at");
        assert_eq!(state.filter.sort, Some(OrderBy::asc("created_at")));
    }

    #[test]
    fn reset_keeps_sort() {
        let mut state = ListState::new(10);
        state.set_sort("price", Dir::Desc);
        state.set_search("chair");
        state.select("category", "Furniture");
        state.reset_filters();

        assert!(state.filter.is_empty());
        assert_eq!(state.filter.sort, Some(OrderBy::desc("price")));
    }

    #[test]
    fn page_navigation_stays_positive() {
        let mut state = ListState::new(10);
        state.previous_page();
        assert_eq!(state.pagination.page, 1);
        state.next_page();
        state.next_page();
        assert_eq!(state.pagination.page, 3);
        state.go_to_page(0);
        assert_eq!(state.pagination.page, 1);
    }
}
