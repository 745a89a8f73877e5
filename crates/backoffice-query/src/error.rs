//! Error types for the query crate.

use thiserror::Error;

/// Invalid filter or pagination configuration supplied by the caller.
///
/// These are reported before any record is examined. The engine never
/// attempts to repair its input: an inverted range is not swapped, an
/// unknown sort field is not ignored.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// Page size was zero.
    #[error("page size must be greater than zero")]
    NonPositivePageSize,

    /// Range minimum is greater than its maximum.
    #[error("invalid range: minimum {min} is greater than maximum {max}")]
    InvertedRange { min: f64, max: f64 },

    /// A range bound is NaN.
    #[error("invalid range: bounds must be numbers")]
    InvalidRangeBound,

    /// A range filter was given for a record type without a range field.
    #[error("records of type '{record}' have no range field")]
    RangeNotSupported { record: &'static str },

    /// Sort field is not part of the record schema.
    #[error("unknown sort field '{0}'")]
    UnknownSortField(String),

    /// Sort field exists but is not declared sortable.
    #[error("field '{0}' is not sortable")]
    FieldNotSortable(String),

    /// Selection on a field that is missing or not declared filterable.
    #[error("field '{0}' cannot be used as a filter")]
    UnknownFilterField(String),
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, ConfigurationError>;
