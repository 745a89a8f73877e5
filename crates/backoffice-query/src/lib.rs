//! Backoffice query - search, filter, sort and paginate record collections.
//!
//! Every list screen of the back office (users, products) runs the same
//! pipeline over an in-memory collection:
//!
//! - a case-insensitive free-text search over the searchable fields,
//! - exact-match selections (`status = active`, `category = Furniture`),
//! - an inclusive numeric range (price),
//! - a stable sort on one field, with locale-aware text collation,
//! - slicing one page, clamped into the available pages.
//!
//! The pipeline is a pure function of its inputs: [`query`] borrows the
//! records and a configuration, and returns a fresh [`Page`].
//!
//! # Quick Start
//!
//! ```rust
//! use backoffice_query::{query, FieldDef, FilterState, PaginationState, Record, Schema, Value};
//!
//! struct User {
//!     id: String,
//!     name: String,
//!     email: String,
//!     status: &'static str,
//! }
//!
//! fn name(u: &User) -> Value<'_> { Value::String(&u.name) }
//! fn email(u: &User) -> Value<'_> { Value::String(&u.email) }
//! fn status(u: &User) -> Value<'_> { Value::String(u.status) }
//!
//! impl Record for User {
//!     fn schema() -> Schema<Self> {
//!         Schema::new("User", vec![
//!             FieldDef::text("name", name).searchable().sortable(),
//!             FieldDef::text("email", email).searchable().sortable(),
//!             FieldDef::text("status", status).filterable(),
//!         ])
//!     }
//!     fn id(&self) -> &str { &self.id }
//! }
//!
//! let users = vec![
//!     User { id: "1".into(), name: "John Doe".into(), email: "john@example.com".into(), status: "active" },
//!     User { id: "2".into(), name: "Jane Smith".into(), email: "jane@example.com".into(), status: "active" },
//!     User { id: "3".into(), name: "Mike Johnson".into(), email: "mike@example.com".into(), status: "inactive" },
//! ];
//!
//! let filter = FilterState::new().search("J").select("status", "active").order_asc("name");
//! let page = query(&users, &filter, &PaginationState::new(10)).unwrap();
//!
//! assert_eq!(page.pagination.total, 2);
//! assert_eq!(page.items[0].name, "Jane Smith");
//! ```
//!
//! # Configuration Errors
//!
//! Bad configuration is reported as a [`ConfigurationError`] before any
//! record is read: a zero page size, an inverted or NaN range, a range on a
//! record type without a range field, and unknown or non-sortable sort
//! fields. An empty result is never an error.
//!
//! # Field Schemas
//!
//! The engine learns about a record type through [`Record::schema`]. Write
//! it by hand with [`FieldDef`] builders, or derive it with
//! `#[derive(Record)]` from `backoffice-macros`.

pub mod collate;
mod engine;
mod error;
mod filter;
mod ordering;
mod pagination;
mod schema;
mod state;
mod value;

pub use engine::{count, query, OwnedPage, Page};
pub use error::{ConfigurationError, Result};
pub use filter::{is_unfiltered, resolve_clauses, Clause, FilterState, NumericRange, ALL};
pub use ordering::{compare_values, Dir, OrderBy};
pub use pagination::{PageLink, PaginationState, DEFAULT_PAGE_SIZE, DEFAULT_VISIBLE_PAGES};
pub use schema::{Accessor, FieldDef, FieldKind, Record, Schema};
pub use state::ListState;
pub use value::{Number, Timestamp, ToTimestamp, Value};
