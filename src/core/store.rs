//! Store traits for filtering and sorting
//!
//! Storage applies a [`ResolvedOrdering`] natively: each clause names a
//! column, and rows expose their columns through [`Sortable`].

use crate::core::error::StorageError;
use crate::core::field::FieldValue;
use crate::core::sort::{OrderClause, ResolvedOrdering};
use std::cmp::Ordering;

/// A storage row that can be ordered by named columns
pub trait Sortable {
    /// Entity name used in error messages
    const ENTITY: &'static str;

    /// Columns an ordering may reference
    const COLUMNS: &'static [&'static str];

    /// Read a column; names are matched ignoring case
    fn column_value(&self, column: &str) -> Option<FieldValue>;
}

/// A row predicate
pub trait Filter<T> {
    fn matches(&self, item: &T) -> bool;
}

/// Trait for stores that support filtering and sorting
///
/// Implement this trait for stores that keep their rows in memory; the
/// provided methods do the filtering and ordering.
pub trait QueryableStore<T: Sortable>: Send + Sync {
    type Filter: Filter<T>;

    /// Get all entities (unfiltered, unsorted)
    fn list_all(&self) -> Result<Vec<T>, StorageError>;

    /// Keep the entities matching `filter`
    fn apply_filters(&self, data: Vec<T>, filter: &Self::Filter) -> Vec<T> {
        data.into_iter().filter(|item| filter.matches(item)).collect()
    }

    /// Order entities by `ordering`
    fn apply_ordering(&self, data: Vec<T>, ordering: &ResolvedOrdering) -> Result<Vec<T>, StorageError> {
        apply_ordering(data, ordering)
    }

    /// Filter then order [`list_all`](Self::list_all)
    fn query(&self, filter: &Self::Filter, ordering: &ResolvedOrdering) -> Result<Vec<T>, StorageError> {
        let filtered = self.apply_filters(self.list_all()?, filter);
        self.apply_ordering(filtered, ordering)
    }
}

/// Stable sort by every clause in priority order
///
/// Every clause must name one of `T::COLUMNS`; otherwise the ordering is
/// rejected with [`StorageError::UnknownColumn`] before any row is read. An
/// unordered ordering keeps the input order.
pub fn apply_ordering<T: Sortable>(
    data: Vec<T>,
    ordering: &ResolvedOrdering,
) -> Result<Vec<T>, StorageError> {
    if ordering.is_unordered() {
        return Ok(data);
    }

    for clause in ordering {
        if !T::COLUMNS.iter().any(|c| c.eq_ignore_ascii_case(&clause.field)) {
            return Err(StorageError::UnknownColumn {
                entity_type: T::ENTITY.to_string(),
                column: clause.field.clone(),
            });
        }
    }

    let mut keyed: Vec<(Vec<FieldValue>, T)> = data
        .into_iter()
        .map(|item| {
            let key = ordering
                .clauses()
                .iter()
                .map(|clause| item.column_value(&clause.field).unwrap_or(FieldValue::Null))
                .collect();
            (key, item)
        })
        .collect();

    keyed.sort_by(|(a, _), (b, _)| compare_keys(a, b, ordering.clauses()));
    Ok(keyed.into_iter().map(|(_, item)| item).collect())
}

fn compare_keys(a: &[FieldValue], b: &[FieldValue], clauses: &[OrderClause]) -> Ordering {
    a.iter()
        .zip(b)
        .zip(clauses)
        .map(|((a, b), clause)| {
            let ordering = a.sort_cmp(b);
            if clause.descending {
                ordering.reverse()
            } else {
                ordering
            }
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Author list filter
///
/// Blank values are dropped at construction, so a present value always has
/// content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorFilter {
    main_category: Option<String>,
    search_query: Option<String>,
}

impl AuthorFilter {
    pub fn new(main_category: Option<&str>, search_query: Option<&str>) -> Self {
        let non_blank = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Self {
            main_category: non_blank(main_category),
            search_query: non_blank(search_query),
        }
    }

    /// Category that must match exactly, ignoring case
    pub fn main_category(&self) -> Option<&str> {
        self.main_category.as_deref()
    }

    /// Text that must appear in one of the searchable columns, ignoring case
    pub fn search_query(&self) -> Option<&str> {
        self.search_query.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.main_category.is_none() && self.search_query.is_none()
    }

    /// Does `category` satisfy the category filter?
    pub fn category_matches(&self, category: &str) -> bool {
        self.main_category
            .as_deref()
            .is_none_or(|wanted| category.trim().eq_ignore_ascii_case(wanted))
    }

    /// Does any of `haystacks` contain the search text?
    pub fn search_matches<'a>(&self, haystacks: impl IntoIterator<Item = &'a str>) -> bool {
        let Some(needle) = self.search_query.as_deref() else {
            return true;
        };
        let needle = needle.to_lowercase();
        haystacks
            .into_iter()
            .any(|haystack| haystack.to_lowercase().contains(&needle))
    }
}
