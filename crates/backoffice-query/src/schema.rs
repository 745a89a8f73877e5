//! Record schemas.
//!
//! A [`Schema`] maps field names to typed accessor functions and records
//! which engine operations each field takes part in. The engine resolves
//! every field name in a [`FilterState`](crate::FilterState) against the
//! schema once per call, then works only with accessors.
//!
//! Schemas are usually generated with `#[derive(Record)]` from the
//! `backoffice-macros` crate, but can also be written by hand.

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// The declared type of a field, which selects its comparison rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Compared with locale-aware collation.
    Text,
    /// Compared numerically.
    Number,
    /// Compared chronologically.
    Date,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
        }
    }
}

/// Reads one field of a record.
pub type Accessor<R> = for<'a> fn(&'a R) -> Value<'a>;

/// Descriptor for a single field.
pub struct FieldDef<R> {
    /// Field name used in filter and sort configuration.
    pub name: &'static str,
    /// Declared type.
    pub kind: FieldKind,
    /// Reads the field from a record.
    pub access: Accessor<R>,
    /// Included in free-text search.
    pub searchable: bool,
    /// Usable for exact-match selection.
    pub filterable: bool,
    /// Usable as a sort key.
    pub sortable: bool,
    /// Target of the numeric range filter.
    pub range: bool,
}

// Manual impls: a derive would require `R: Clone`.
impl<R> Clone for FieldDef<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for FieldDef<R> {}

impl<R> std::fmt::Debug for FieldDef<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDef")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("searchable", &self.searchable)
            .field("filterable", &self.filterable)
            .field("sortable", &self.sortable)
            .field("range", &self.range)
            .finish()
    }
}

impl<R> FieldDef<R> {
    /// Creates a descriptor that takes part in no operation yet.
    pub fn new(name: &'static str, kind: FieldKind, access: Accessor<R>) -> Self {
        FieldDef {
            name,
            kind,
            access,
            searchable: false,
            filterable: false,
            sortable: false,
            range: false,
        }
    }

    /// Shorthand for a `Text` field.
    pub fn text(name: &'static str, access: Accessor<R>) -> Self {
        FieldDef::new(name, FieldKind::Text, access)
    }

    /// Shorthand for a `Number` field.
    pub fn number(name: &'static str, access: Accessor<R>) -> Self {
        FieldDef::new(name, FieldKind::Number, access)
    }

    /// Shorthand for a `Date` field.
    pub fn date(name: &'static str, access: Accessor<R>) -> Self {
        FieldDef::new(name, FieldKind::Date, access)
    }

    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn range(mut self) -> Self {
        self.range = true;
        self
    }

    /// Reads this field from a record.
    pub fn read<'a>(&self, record: &'a R) -> Value<'a> {
        (self.access)(record)
    }
}

/// Field descriptors for a record type.
pub struct Schema<R> {
    record: &'static str,
    fields: Vec<FieldDef<R>>,
}

impl<R> Clone for Schema<R> {
    fn clone(&self) -> Self {
        Schema {
            record: self.record,
            fields: self.fields.clone(),
        }
    }
}

impl<R> std::fmt::Debug for Schema<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("record", &self.record)
            .field("fields", &self.fields)
            .finish()
    }
}

impl<R> Schema<R> {
    /// Creates a schema named after the record type.
    pub fn new(record: &'static str, fields: Vec<FieldDef<R>>) -> Self {
        Schema { record, fields }
    }

    /// Name of the record type, used in error messages.
    pub fn record_name(&self) -> &'static str {
        self.record
    }

    pub fn fields(&self) -> &[FieldDef<R>] {
        &self.fields
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDef<R>> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields included in free-text search.
    pub fn searchable(&self) -> impl Iterator<Item = &FieldDef<R>> {
        self.fields.iter().filter(|f| f.searchable)
    }

    /// Fields usable for exact-match selection.
    pub fn filterable(&self) -> impl Iterator<Item = &FieldDef<R>> {
        self.fields.iter().filter(|f| f.filterable)
    }

    /// Fields usable as sort keys.
    pub fn sortable(&self) -> impl Iterator<Item = &FieldDef<R>> {
        self.fields.iter().filter(|f| f.sortable)
    }

    /// The numeric range field. The first one wins if several are marked.
    pub fn range_field(&self) -> Option<&FieldDef<R>> {
        self.fields
            .iter()
            .find(|f| f.range && f.kind == FieldKind::Number)
    }
}

/// An entity the engine can query.
///
/// # Derive Usage
///
/// ```ignore
/// use backoffice_macros::Record;
///
/// #[derive(Record)]
/// struct Product {
///     #[record(id)]
///     id: String,
///     #[record(text, search, sort)]
///     name: String,
///     #[record(text, filter)]
///     status: Status, // Status: AsRef<str>
///     #[record(number, range, sort)]
///     price: f64,
/// }
/// ```
///
/// # Manual Implementation
///
/// ```
/// use backoffice_query::{FieldDef, Number, Record, Schema, Value};
///
/// struct Product {
///     id: String,
///     name: String,
///     price: f64,
/// }
///
/// fn name(p: &Product) -> Value<'_> {
///     Value::String(&p.name)
/// }
///
/// fn price(p: &Product) -> Value<'_> {
///     Value::Number(Number::F64(p.price))
/// }
///
/// impl Record for Product {
///     fn schema() -> Schema<Self> {
///         Schema::new(
///             "Product",
///             vec![
///                 FieldDef::text("name", name).searchable().sortable(),
///                 FieldDef::number("price", price).range().sortable(),
///             ],
///         )
///     }
///
///     fn id(&self) -> &str {
///         &self.id
///     }
/// }
/// ```
pub trait Record: Sized {
    /// Returns the field descriptors for this record type.
    fn schema() -> Schema<Self>;

    /// Stable unique identifier.
    fn id(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;

    struct Item {
        id: String,
        name: String,
        qty: i64,
    }

    fn name(item: &Item) -> Value<'_> {
        Value::String(&item.name)
    }

    fn qty(item: &Item) -> Value<'_> {
        Value::Number(Number::I64(item.qty))
    }

    impl Record for Item {
        fn schema() -> Schema<Self> {
            Schema::new(
                "Item",
                vec![
                    FieldDef::text("name", name).searchable().sortable(),
                    FieldDef::number("qty", qty).range(),
                ],
            )
        }

        fn id(&self) -> &str {
            &self.id
        }
    }

    #[test]
    fn field_lookup_and_roles() {
        let schema = Item::schema();
        assert_eq!(schema.record_name(), "Item");
        assert!(schema.field("name").is_some());
        assert!(schema.field("missing").is_none());
        assert_eq!(schema.searchable().count(), 1);
        assert_eq!(schema.sortable().count(), 1);
        assert_eq!(schema.filterable().count(), 0);
        assert_eq!(schema.range_field().map(|f| f.name), Some("qty"));
    }

    #[test]
    fn accessor_reads_record() {
        let item = Item {
            id: "1".into(),
            name: "widget".into(),
            qty: 3,
        };
        let schema = Item::schema();
        let field = schema.field("qty").unwrap();
        assert_eq!(field.read(&item), Value::Number(Number::I64(3)));
        assert_eq!(item.id(), "1");
    }

    #[test]
    fn range_requires_number_kind() {
        let schema: Schema<Item> = Schema::new("Item", vec![FieldDef::text("name", name).range()]);
        assert!(schema.range_field().is_none());
    }
}
