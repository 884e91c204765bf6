//! Sort expression parsing and translation to storage ordering
//!
//! Clients sort with expressions such as `name, age desc`. Each clause is
//! looked up in a [`PropertyMapping`] and expanded into storage columns,
//! producing a [`ResolvedOrdering`] the repository applies natively.
//!
//! Two entry points share one parser and deliberately disagree about unknown
//! fields: [`is_valid_sort_expression`] rejects them, [`translate`] skips them.
//! Handlers that want a hard 400 run the gate before translating.

use crate::core::mapping::PropertyMapping;
use serde::Serialize;

/// One parsed clause of a client sort expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortDirective {
    /// Field token as the client wrote it
    pub field: String,
    pub descending: bool,
}

/// One storage-side ordering clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderClause {
    /// Storage column name
    pub field: String,
    pub descending: bool,
}

impl OrderClause {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }
}

/// Storage-ready ordering: first clause is the primary key, the rest break ties
///
/// An empty ordering means "keep the source order".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedOrdering {
    clauses: Vec<OrderClause>,
}

impl ResolvedOrdering {
    /// No explicit order
    pub fn unordered() -> Self {
        Self::default()
    }

    pub fn from_clauses(clauses: Vec<OrderClause>) -> Self {
        Self { clauses }
    }

    pub fn clauses(&self) -> &[OrderClause] {
        &self.clauses
    }

    pub fn is_unordered(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl<'a> IntoIterator for &'a ResolvedOrdering {
    type Item = &'a OrderClause;
    type IntoIter = std::slice::Iter<'a, OrderClause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}

/// Parse a comma-separated sort expression
///
/// Each clause is trimmed; a trailing ` desc` (any case) marks it descending,
/// and the field token is everything before the first space. Blank
/// expressions parse to no directives. A blank clause inside a non-blank
/// expression yields an empty field token, which no mapping contains.
pub fn parse_sort_expression(sort_expression: &str) -> Vec<SortDirective> {
    if sort_expression.trim().is_empty() {
        return Vec::new();
    }

    sort_expression
        .split(',')
        .map(|clause| {
            let clause = clause.trim();
            let descending = ends_with_desc(clause);
            let field = clause.split(' ').next().unwrap_or_default();
            SortDirective {
                field: field.to_string(),
                descending,
            }
        })
        .collect()
}

fn ends_with_desc(clause: &str) -> bool {
    const SUFFIX: &str = " desc";
    clause
        .len()
        .checked_sub(SUFFIX.len())
        .and_then(|start| clause.get(start..))
        .is_some_and(|tail| tail.eq_ignore_ascii_case(SUFFIX))
}

/// Translate a sort expression into storage ordering
///
/// Unknown field tokens contribute nothing. A mapping value with several
/// destination columns expands to one clause per column, all sharing the
/// clause direction, inverted when the mapping says so.
pub fn translate(sort_expression: &str, mapping: &PropertyMapping) -> ResolvedOrdering {
    let mut clauses = Vec::new();

    for directive in parse_sort_expression(sort_expression) {
        let Some(value) = mapping.get(&directive.field) else {
            tracing::debug!(field = %directive.field, "skipping unmapped sort field");
            continue;
        };

        let descending = directive.descending ^ value.revert_direction();
        clauses.extend(value.destination_fields().iter().map(|destination| OrderClause {
            field: destination.clone(),
            descending,
        }));
    }

    ResolvedOrdering { clauses }
}

/// Sort gate: every clause must name a mapped field
///
/// Blank expressions are always valid.
pub fn is_valid_sort_expression(sort_expression: &str, mapping: &PropertyMapping) -> bool {
    parse_sort_expression(sort_expression)
        .iter()
        .all(|directive| mapping.contains(&directive.field))
}
