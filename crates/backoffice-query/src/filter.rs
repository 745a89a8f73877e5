//! Filter configuration and its resolved predicates.
//!
//! [`FilterState`] is the caller-facing configuration: free text, exact
//! selections, a numeric range and the sort order. Before records are
//! examined it is resolved against a [`Schema`] into [`Clause`]s, each of
//! which holds the accessor it needs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};
use crate::ordering::{Dir, OrderBy};
use crate::schema::{Accessor, FieldKind, Schema};
use crate::value::Value;

/// Selection value meaning "no filter on this field".
pub const ALL: &str = "all";

/// Returns `true` if a selection value disables its filter.
///
/// Both the `"all"` sentinel and the empty string count.
pub fn is_unfiltered(selection: &str) -> bool {
    selection.is_empty() || selection == ALL
}

/// Inclusive numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub fn new(min: f64, max: f64) -> Self {
        NumericRange { min, max }
    }

    /// Rejects NaN bounds and `min > max`.
    pub fn validate(&self) -> Result<()> {
        if self.min.is_nan() || self.max.is_nan() {
            return Err(ConfigurationError::InvalidRangeBound);
        }
        if self.min > self.max {
            return Err(ConfigurationError::InvertedRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Both bounds are inclusive.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// What the caller wants to see: search text, selections, range and sort.
///
/// Every part is optional. An empty `FilterState` matches every record and
/// keeps input order.
///
/// ```
/// use backoffice_query::FilterState;
///
/// let filter = FilterState::new()
///     .search("coffee")
///     .select("status", "active")
///     .within(10.0, 50.0)
///     .order_asc("price");
///
/// assert_eq!(filter.search, "coffee");
/// assert_eq!(filter.sort.as_ref().map(|o| o.field.as_str()), Some("price"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Free-text query; empty means no text filter.
    pub search: String,
    /// Exact-match selections keyed by field name.
    pub selections: BTreeMap<String, String>,
    /// Inclusive range on the schema's range field.
    pub range: Option<NumericRange>,
    /// Sort field and direction.
    pub sort: Option<OrderBy>,
}

impl FilterState {
    /// Creates an empty filter that matches everything.
    pub fn new() -> Self {
        FilterState::default()
    }

    /// Sets the free-text query.
    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = query.into();
        self
    }

    /// Selects an exact value for a field. `"all"` or `""` clears it.
    pub fn select(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.selections.insert(field.into(), value.into());
        self
    }

    /// Restricts the range field to `[min, max]`.
    pub fn within(mut self, min: f64, max: f64) -> Self {
        self.range = Some(NumericRange::new(min, max));
        self
    }

    /// Sorts by a field in the given direction.
    pub fn order_by(mut self, field: impl Into<String>, dir: Dir) -> Self {
        self.sort = Some(OrderBy::new(field, dir));
        self
    }

    /// Sorts ascending by a field.
    pub fn order_asc(self, field: impl Into<String>) -> Self {
        self.order_by(field, Dir::Asc)
    }

    /// Sorts descending by a field.
    pub fn order_desc(self, field: impl Into<String>) -> Self {
        self.order_by(field, Dir::Desc)
    }

    /// Selections that actually filter, skipping sentinels.
    pub fn active_selections(&self) -> impl Iterator<Item = (&str, &str)> {
        self.selections
            .iter()
            .filter(|(_, value)| !is_unfiltered(value))
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }

    /// Returns `true` if no search, selection or range is set.
    ///
    /// Sorting does not count: it never removes records.
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.active_selections().next().is_none() && self.range.is_none()
    }
}

/// A single resolved predicate.
pub enum Clause<R> {
    /// Any of the accessors contains `needle` (already lowercased).
    Search {
        needle: String,
        fields: Vec<Accessor<R>>,
    },
    /// The accessor equals `value` exactly.
    Equals { field: Accessor<R>, value: String },
    /// The accessor lies within `range`.
    Between {
        field: Accessor<R>,
        range: NumericRange,
    },
}

impl<R> Clause<R> {
    /// Evaluates this clause against a record.
    pub fn matches(&self, record: &R) -> bool {
        match self {
            Clause::Search { needle, fields } => fields
                .iter()
                .any(|access| contains_folded(&access(record), needle)),
            Clause::Equals { field, value } => field(record).as_str() == Some(value.as_str()),
            Clause::Between { field, range } => field(record)
                .as_number()
                .is_some_and(|n| range.contains(n.to_f64())),
        }
    }
}

fn contains_folded(value: &Value<'_>, needle: &str) -> bool {
    match value {
        Value::String(s) => s.to_lowercase().contains(needle),
        _ => false,
    }
}

/// Resolves the filtering part of a [`FilterState`] into clauses.
///
/// Clauses come out in evaluation order: search, selections, range.
pub fn resolve_clauses<R>(schema: &Schema<R>, filter: &FilterState) -> Result<Vec<Clause<R>>> {
    let mut clauses = Vec::new();

    if !filter.search.is_empty() {
        clauses.push(Clause::Search {
            needle: filter.search.to_lowercase(),
            fields: schema.searchable().map(|f| f.access).collect(),
        });
    }

    for (name, value) in filter.active_selections() {
        let field = schema
            .field(name)
            .filter(|f| f.filterable && f.kind == FieldKind::Text)
            .ok_or_else(|| ConfigurationError::UnknownFilterField(name.to_string()))?;
        clauses.push(Clause::Equals {
            field: field.access,
            value: value.to_string(),
        });
    }

    if let Some(range) = filter.range {
        range.validate()?;
        let field = schema
            .range_field()
            .ok_or(ConfigurationError::RangeNotSupported {
                record: schema.record_name(),
            })?;
        debug_assert_eq!(field.kind, FieldKind::Number);
        clauses.push(Clause::Between {
            field: field.access,
            range,
        });
    }

    Ok(clauses)
}
