//! Ordering types for result sorting.
//!
//! Provides [`Dir`] for sort direction and [`OrderBy`] for the sort field.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::collate::locale_cmp;
use crate::schema::FieldKind;
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Applies this direction to an ordering.
    ///
    /// For `Asc`, returns the ordering unchanged.
    /// For `Desc`, reverses the ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// The opposite direction.
    pub fn flip(self) -> Dir {
        match self {
            Dir::Asc => Dir::Desc,
            Dir::Desc => Dir::Asc,
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The sort field and its direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    #[serde(default)]
    pub dir: Dir,
}

impl OrderBy {
    /// Creates a new ascending ordering for the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        OrderBy::new(field, Dir::Asc)
    }

    /// Creates a new descending ordering for the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        OrderBy::new(field, Dir::Desc)
    }

    /// Creates a new ordering with the given direction.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        OrderBy {
            field: field.into(),
            dir,
        }
    }
}

/// Compares two field values according to the field's declared kind.
///
/// Values with no place in the order sort after orderable ones, and that
/// placement does not depend on `dir`: a descending sort still lists them
/// last. A value has no place when it is missing, is a NaN number, or
/// does not match the declared kind. For orderable values the direction
/// is applied to the comparator result, which keeps a stable sort stable
/// in both directions.
pub fn compare_values(kind: FieldKind, dir: Dir, a: &Value<'_>, b: &Value<'_>) -> Ordering {
    match (orderable(kind, a), orderable(kind, b)) {
        (false, false) => Ordering::Equal,
        (false, true) => Ordering::Greater,
        (true, false) => Ordering::Less,
        (true, true) => dir.apply(compare_present(a, b)),
    }
}

fn orderable(kind: FieldKind, value: &Value<'_>) -> bool {
    match (kind, value) {
        (FieldKind::Text, Value::String(_)) => true,
        (FieldKind::Number, Value::Number(n)) => !n.to_f64().is_nan(),
        (FieldKind::Date, Value::Timestamp(_)) => true,
        _ => false,
    }
}

/// Both sides have passed [`orderable`] for the same kind.
fn compare_present(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    match (a, b) {
        (Value::String(a), Value::String(b)) => locale_cmp(a, b),
        (Value::Number(a), Value::Number(b)) => a.compare(*b).unwrap_or(Ordering::Equal),
        (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
        _ => Ordering::Equal,
    }
}
