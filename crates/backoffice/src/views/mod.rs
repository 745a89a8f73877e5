//! Text views of command results.
//!
//! Commands build a [`ListView`] or [`DetailView`] from their data and the
//! [`Renderer`] turns it into text through minijinja templates. Structured
//! output modes skip all of this and serialize the data itself.

mod detail_view;
mod display;
mod list_view;
mod message;
mod render;

pub use detail_view::{DetailField, DetailView};
pub use list_view::{describe_filter, showing, ListView, ListViewBuilder, PageSlot};
pub use message::{Message, MessageLevel};
pub use render::Renderer;

/// A record that renders as one table row.
pub trait Tabular {
    /// Column headers, in row order.
    fn headers() -> &'static [&'static str];

    fn row(&self) -> Vec<String>;
}

/// A record that renders as labelled fields.
pub trait Detail {
    fn title(&self) -> String;

    fn fields(&self) -> Vec<(&'static str, String)>;
}
