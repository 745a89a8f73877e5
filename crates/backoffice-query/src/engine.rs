//! Query execution.
//!
//! [`query`] is the single entry point: filter, then sort, then slice one
//! page. It reads its inputs and returns a fresh [`Page`]; nothing is
//! cached between calls.

use serde::Serialize;

use crate::error::{ConfigurationError, Result};
use crate::filter::{resolve_clauses, Clause, FilterState};
use crate::ordering::{compare_values, Dir};
use crate::pagination::PaginationState;
use crate::schema::{Accessor, FieldKind, Record, Schema};

/// One page of results, borrowing from the queried records.
#[derive(Debug)]
pub struct Page<'a, R> {
    /// Records on this page, in sorted order.
    pub items: Vec<&'a R>,
    /// Counters consistent with `items`.
    pub pagination: PaginationState,
}

impl<'a, R> Page<'a, R> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Clones the records so the page can outlive the collection.
    pub fn into_owned(self) -> OwnedPage<R>
    where
        R: Clone,
    {
        OwnedPage {
            items: self.items.into_iter().cloned().collect(),
            pagination: self.pagination,
        }
    }
}

/// A page that owns its records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnedPage<R> {
    pub items: Vec<R>,
    pub pagination: PaginationState,
}

/// The sort field, resolved to its accessor.
struct SortKey<R> {
    access: Accessor<R>,
    kind: FieldKind,
    dir: Dir,
}

fn resolve_sort<R>(schema: &Schema<R>, filter: &FilterState) -> Result<Option<SortKey<R>>> {
    let Some(order) = &filter.sort else {
        return Ok(None);
    };
    let field = schema
        .field(&order.field)
        .ok_or_else(|| ConfigurationError::UnknownSortField(order.field.clone()))?;
    if !field.sortable {
        return Err(ConfigurationError::FieldNotSortable(order.field.clone()));
    }
    Ok(Some(SortKey {
        access: field.access,
        kind: field.kind,
        dir: order.dir,
    }))
}

/// Runs a query over `records`.
///
/// Steps, always in this order:
///
/// 1. free-text search over the searchable fields (case-insensitive),
/// 2. exact-match selections,
/// 3. the numeric range (inclusive),
/// 4. a stable sort on the sort field, if any,
/// 5. slicing the requested page, clamped into `1..=total_pages`.
///
/// Configuration is validated before any record is read; see
/// [`ConfigurationError`] for what is rejected. An empty collection, a
/// search with no hits and a page past the end are not errors.
///
/// ```
/// use backoffice_query::{query, FieldDef, FilterState, Number, PaginationState, Record, Schema, Value};
///
/// struct Product { id: String, name: String, price: f64 }
///
/// fn name(p: &Product) -> Value<'_> { Value::String(&p.name) }
/// fn price(p: &Product) -> Value<'_> { Value::Number(Number::F64(p.price)) }
///
/// impl Record for Product {
///     fn schema() -> Schema<Self> {
///         Schema::new("Product", vec![
///             FieldDef::text("name", name).searchable().sortable(),
///             FieldDef::number("price", price).range().sortable(),
///         ])
///     }
///     fn id(&self) -> &str { &self.id }
/// }
///
/// let products = vec![
///     Product { id: "1".into(), name: "Desk".into(), price: 250.0 },
///     Product { id: "2".into(), name: "Lamp".into(), price: 40.0 },
///     Product { id: "3".into(), name: "Chair".into(), price: 120.0 },
/// ];
///
/// let filter = FilterState::new().within(50.0, 300.0).order_asc("price");
/// let page = query(&products, &filter, &PaginationState::new(10)).unwrap();
///
/// assert_eq!(page.pagination.total, 2);
/// assert_eq!(page.items[0].name, "Chair");
/// ```
pub fn query<'a, R: Record>(
    records: &'a [R],
    filter: &FilterState,
    pagination: &PaginationState,
) -> Result<Page<'a, R>> {
    if pagination.page_size == 0 {
        return Err(ConfigurationError::NonPositivePageSize);
    }

    let schema = R::schema();
    let clauses = resolve_clauses(&schema, filter)?;
    let sort = resolve_sort(&schema, filter)?;

    let mut matched: Vec<&'a R> = records
        .iter()
        .filter(|record| matches_all(&clauses, *record))
        .collect();

    if let Some(key) = sort {
        // `sort_by` is stable, so equal keys keep input order.
        matched.sort_by(|a, b| {
            compare_values(key.kind, key.dir, &(key.access)(*a), &(key.access)(*b))
        });
    }

    let resolved = PaginationState::resolve(pagination.page, pagination.page_size, matched.len());
    let items = matched
        .into_iter()
        .skip(resolved.offset())
        .take(resolved.page_size)
        .collect();

    Ok(Page {
        items,
        pagination: resolved,
    })
}

fn matches_all<R>(clauses: &[Clause<R>], record: &R) -> bool {
    clauses.iter().all(|clause| clause.matches(record))
}

/// Counts matching records without sorting or slicing.
pub fn count<R: Record>(records: &[R], filter: &FilterState) -> Result<usize> {
    let schema = R::schema();
    let clauses = resolve_clauses(&schema, filter)?;
    Ok(records
        .iter()
        .filter(|record| matches_all(&clauses, *record))
        .count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDef;
    use crate::value::{Number, Value};

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: String,
        label: String,
        score: i64,
    }

    fn label(r: &Row) -> Value<'_> {
        Value::String(&r.label)
    }

    fn score(r: &Row) -> Value<'_> {
        Value::Number(Number::I64(r.score))
    }

    impl Record for Row {
        fn schema() -> Schema<Self> {
            Schema::new(
                "Row",
                vec![
                    FieldDef::text("label", label).searchable().filterable(),
                    FieldDef::number("score", score).sortable().range(),
                ],
            )
        }

        fn id(&self) -> &str {
            &self.id
        }
    }

    fn rows(n: usize) -> Vec<Row> {
        (0..n)
            .map(|i| Row {
                id: i.to_string(),
                label: format!("row {}", i),
                score: (i % 4) as i64,
            })
            .collect()
    }

    #[test]
    fn empty_filter_returns_everything_in_order() {
        let data = rows(5);
        let page = query(&data, &FilterState::new(), &PaginationState::new(10)).unwrap();
        assert_eq!(page.pagination.total, 5);
        assert_eq!(page.pagination.total_pages, 1);
        let ids: Vec<_> = page.items.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["0", "1", "2", "3", "4"]);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let data = rows(3);
        let err = query(&data, &FilterState::new(), &PaginationState::new(0)).unwrap_err();
        assert_eq!(err, ConfigurationError::NonPositivePageSize);
    }

    #[test]
    fn unknown_and_unsortable_fields_are_rejected() {
        let data = rows(3);
        let p = PaginationState::new(10);

        let unknown = FilterState::new().order_asc("missing");
        assert_eq!(
            query(&data, &unknown, &p).unwrap_err(),
            ConfigurationError::UnknownSortField("missing".into())
        );

        let unsortable = FilterState::new().order_asc("label");
        assert_eq!(
            query(&data, &unsortable, &p).unwrap_err(),
            ConfigurationError::FieldNotSortable("label".into())
        );
    }

    #[test]
    fn errors_are_reported_on_empty_collections_too() {
        let data: Vec<Row> = Vec::new();
        let filter = FilterState::new().within(100.0, 50.0);
        assert!(query(&data, &filter, &PaginationState::new(10)).is_err());
    }

    #[test]
    fn descending_sort_is_stable() {
        let data = rows(8);
        let filter = FilterState::new().order_desc("score");
        let page = query(&data, &filter, &PaginationState::new(10)).unwrap();
        let ids: Vec<_> = page.items.iter().map(|r| r.id.as_str()).collect();
        // scores: 0 1 2 3 0 1 2 3
        assert_eq!(ids, ["3", "7", "2", "6", "1", "5", "0", "4"]);
    }

    #[derive(Debug)]
    struct Priced {
        id: String,
        price: f64,
    }

    fn price(p: &Priced) -> Value<'_> {
        Value::Number(Number::F64(p.price))
    }

    impl Record for Priced {
        fn schema() -> Schema<Self> {
            Schema::new("Priced", vec![FieldDef::number("price", price).sortable()])
        }

        fn id(&self) -> &str {
            &self.id
        }
    }

    #[test]
    fn nan_prices_sort_last_in_both_directions() {
        let data: Vec<Priced> = (0..64)
            .map(|i| Priced {
                id: i.to_string(),
                price: if i % 7 == 0 { f64::NAN } else { ((i * 37) % 64) as f64 },
            })
            .collect();
        let nan_ids: Vec<String> = (0..64).step_by(7).map(|i: usize| i.to_string()).collect();

        for (filter, ascending) in [
            (FilterState::new().order_asc("price"), true),
            (FilterState::new().order_desc("price"), false),
        ] {
            let page = query(&data, &filter, &PaginationState::new(64)).unwrap();
            assert_eq!(page.len(), 64);

            let (present, tail) = page.items.split_at(64 - nan_ids.len());
            assert!(present.iter().all(|p| !p.price.is_nan()));
            let tail_ids: Vec<String> = tail.iter().map(|p| p.id.clone()).collect();
            assert_eq!(tail_ids, nan_ids);

            let sorted = present.windows(2).all(|w| {
                if ascending {
                    w[0].price <= w[1].price
                } else {
                    w[0].price >= w[1].price
                }
            });
            assert!(sorted);
        }
    }

    #[test]
    fn page_past_end_is_clamped() {
        let data = rows(25);
        let page = query(
            &data,
            &FilterState::new(),
            &PaginationState::new(12).with_page(9),
        )
        .unwrap();
        assert_eq!(page.pagination.page, 3);
        assert_eq!(page.len(), 1);
        assert_eq!(page.items[0].id, "24");
    }

    #[test]
    fn no_matches_gives_empty_first_page() {
        let data = rows(5);
        let filter = FilterState::new().search("nothing like this");
        let page = query(&data, &filter, &PaginationState::new(2).with_page(4)).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.pagination.page, 1);
        assert_eq!(page.pagination.total, 0);
        assert_eq!(page.pagination.total_pages, 0);
    }

    #[test]
    fn into_owned_keeps_counters() {
        let data = rows(3);
        let page = query(&data, &FilterState::new(), &PaginationState::new(2)).unwrap();
        let owned = page.into_owned();
        assert_eq!(owned.items, data[..2].to_vec());
        assert_eq!(owned.pagination.total_pages, 2);
    }

    #[test]
    fn count_ignores_pagination() {
        let data = rows(10);
        let filter = FilterState::new().within(2.0, 3.0);
        assert_eq!(count(&data, &filter).unwrap(), 4);
    }
}
