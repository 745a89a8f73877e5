//! List view: a table of records with its pagination footer.
//!
//! A list view has a fixed shape:
//! - Introduction text (title) and an optional filter summary
//! - The table (headers plus one row per item)
//! - Ending text ("Showing X to Y of Z results")
//! - The page-number window, when there is more than one page
//! - Status messages

use backoffice_query::{FilterState, PageLink, PaginationState, DEFAULT_VISIBLE_PAGES};
use console::measure_text_width;
use serde::Serialize;

use super::{Message, MessageLevel, Tabular};

/// One slot in the page-number window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSlot {
    pub label: String,
    pub current: bool,
}

/// Template context for the list template.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_summary: Option<String>,

    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Display width of each column, the widest of header and cells.
    pub widths: Vec<usize>,
    pub empty_message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ending: Option<String>,

    pub pages: Vec<PageSlot>,
    pub messages: Vec<Message>,
}

impl ListView {
    /// Starts a view with one row per item.
    pub fn table<'a, T, I>(items: I) -> ListViewBuilder
    where
        T: Tabular + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        ListViewBuilder::new(
            T::headers().iter().map(|h| h.to_string()).collect(),
            items.into_iter().map(|item| item.row()).collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug)]
pub struct ListViewBuilder {
    view: ListView,
}

impl ListViewBuilder {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let widths = column_widths(&headers, &rows);
        Self {
            view: ListView {
                headers,
                rows,
                widths,
                empty_message: "No items found.".to_string(),
                ..ListView::default()
            },
        }
    }

    pub fn intro(mut self, text: impl Into<String>) -> Self {
        self.view.intro = Some(text.into());
        self
    }

    /// Summarises `filter`; nothing is shown for an unfiltered list.
    pub fn filter(mut self, filter: &FilterState) -> Self {
        self.view.filter_summary = describe_filter(filter);
        self
    }

    pub fn empty_message(mut self, text: impl Into<String>) -> Self {
        self.view.empty_message = text.into();
        self
    }

    pub fn ending(mut self, text: impl Into<String>) -> Self {
        self.view.ending = Some(text.into());
        self
    }

    /// Adds the results line and the page-number window.
    pub fn paginated(mut self, pagination: &PaginationState) -> Self {
        self.view.ending = Some(showing(pagination));
        if pagination.total_pages > 1 {
            self.view.pages = pagination
                .visible_pages(DEFAULT_VISIBLE_PAGES)
                .into_iter()
                .map(|link| PageSlot {
                    label: link.to_string(),
                    current: link == PageLink::Page(pagination.page),
                })
                .collect();
        }
        self
    }

    pub fn message(mut self, level: MessageLevel, text: impl Into<String>) -> Self {
        self.view.messages.push(Message::new(level, text));
        self
    }

    pub fn info(self, text: impl Into<String>) -> Self {
        self.message(MessageLevel::Info, text)
    }

    pub fn success(self, text: impl Into<String>) -> Self {
        self.message(MessageLevel::Success, text)
    }

    pub fn warning(self, text: impl Into<String>) -> Self {
        self.message(MessageLevel::Warning, text)
    }

    pub fn build(self) -> ListView {
        self.view
    }
}

/// "Showing 13 to 24 of 30 results".
pub fn showing(pagination: &PaginationState) -> String {
    format!(
        "Showing {} to {} of {} results",
        pagination.first_item(),
        pagination.last_item(),
        pagination.total
    )
}

/// Describes the active parts of a filter, or `None` if nothing filters.
pub fn describe_filter(filter: &FilterState) -> Option<String> {
    let mut parts = Vec::new();
    if !filter.search.is_empty() {
        parts.push(format!("matching \"{}\"", filter.search));
    }
    for (field, value) in filter.active_selections() {
        parts.push(format!("{}={}", field, value));
    }
    if let Some(range) = &filter.range {
        parts.push(format!("between {} and {}", range.min, range.max));
    }
    if parts.is_empty() {
        None
    } else {
        Some(format!("Filtered by: {}", parts.join(", ")))
    }
}

fn column_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| measure_text_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let width = measure_text_width(cell);
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(width),
                None => widths.push(width),
            }
        }
    }
    widths
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(total: usize, page: usize) -> ListView {
        let mut pagination = PaginationState::new(12).with_page(page);
        pagination.total = total;
        pagination.total_pages = total.div_ceil(12);
        ListViewBuilder::new(vec!["Name".into()], vec![vec!["Desk".into()]])
            .paginated(&pagination)
            .build()
    }

    #[test]
    fn ending_counts_items() {
        assert_eq!(
            view(30, 2).ending.as_deref(),
            Some("Showing 13 to 24 of 30 results")
        );
        assert_eq!(
            view(30, 3).ending.as_deref(),
            Some("Showing 25 to 30 of 30 results")
        );
        assert_eq!(
            view(0, 1).ending.as_deref(),
            Some("Showing 0 to 0 of 0 results")
        );
    }

    #[test]
    fn page_window_marks_current() {
        assert!(view(12, 1).pages.is_empty());

        let pages = view(30, 2).pages;
        let labels: Vec<_> = pages.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["1", "2", "3"]);
        assert!(pages[1].current);
        assert!(!pages[0].current);
    }

    #[test]
    fn widths_cover_header_and_cells() {
        let view = ListViewBuilder::new(
            vec!["ID".into(), "Name".into()],
            vec![vec!["12".into(), "Ergonomic Office Chair".into()], vec!["123".into(), "Mat".into()]],
        )
        .build();
        assert_eq!(view.widths, [3, 22]);
    }

    #[test]
    fn filter_summary() {
        assert_eq!(describe_filter(&FilterState::new().select("status", "all")), None);
        let filter = FilterState::new()
            .search("coffee")
            .select("category", "Food & Beverage")
            .within(10.0, 50.5)
            .order_desc("price");
        assert_eq!(
            describe_filter(&filter).as_deref(),
            Some("Filtered by: matching \"coffee\", category=Food & Beverage, between 10 and 50.5")
        );
    }
}
