//! Proc macros for the backoffice query engine.
//!
//! # Available Macros
//!
//! - [`Record`] - Generate a `backoffice_query::Record` schema from field annotations

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `backoffice_query::Record` for a struct with named fields.
///
/// Each field opts in with `#[record(...)]`; fields without the attribute
/// are invisible to the engine.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `text` | Text field, read through `AsRef<str>` (enums implement it for their wire name) |
/// | `number` | Numeric field, read through `Number::from` on a copy |
/// | `date` | Date field, read through `ToTimestamp` |
/// | `id` | The record's identifier; exactly one field, must be `AsRef<str>` |
/// | `search` | Included in free-text search |
/// | `filter` | Usable for exact-match selection |
/// | `sort` | Usable as a sort key |
/// | `range` | Target of the numeric range filter (`number` only) |
/// | `skip` | Ignore this field entirely |
/// | `rename = "..."` | Name used in filter and sort configuration |
///
/// `Option<T>` fields read as `Value::None` when unset.
///
/// # Generated Code
///
/// 1. Field name constants (e.g. `Product::NAME`, `Product::CREATED_AT`)
/// 2. `Record::schema()` built from one accessor function per field
/// 3. `Record::id()` reading the `id` field
///
/// # Example
///
/// ```ignore
/// use backoffice_macros::Record;
/// use backoffice_query::{query, FilterState, PaginationState};
///
/// #[derive(Record)]
/// struct Product {
///     #[record(id)]
///     id: String,
///
///     #[record(text, search, sort)]
///     name: String,
///
///     #[record(text, search)]
///     sku: Option<String>,
///
///     #[record(number, range, sort)]
///     price: f64,
/// }
///
/// let filter = FilterState::new().within(10.0, 50.0).order_asc(Product::PRICE);
/// let page = query(&products, &filter, &PaginationState::new(12))?;
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
