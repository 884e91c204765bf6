//! Query parameters and pagination metadata

use crate::config::LibraryConfig;
use crate::core::store::AuthorFilter;
use serde::{Deserialize, Serialize};

/// Raw query string of the author list endpoint
///
/// Every parameter is optional; [`AuthorsQuery::resolve`] applies the
/// configured defaults and clamps paging values.
///
/// # Example
/// ```rust,ignore
/// // GET /api/authors?fields=id,name&orderBy=age desc&pageNumber=2&pageSize=5
/// pub async fn get_authors(
///     State(state): State<AppState>,
///     Query(query): Query<AuthorsQuery>,
/// ) -> LibraryResult<Response> {
///     let parameters = query.resolve(&state.config);
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthorsQuery {
    /// Comma-separated field list for shaping
    pub fields: Option<String>,

    /// Sort expression, e.g. `name, age desc`
    pub order_by: Option<String>,

    pub page_number: Option<i64>,
    pub page_size: Option<i64>,

    /// Exact category filter
    pub main_category: Option<String>,

    /// Free-text search
    pub search_query: Option<String>,
}

impl AuthorsQuery {
    /// Apply defaults and clamp paging values
    ///
    /// The page number floors at 1 and the page size clamps into
    /// `[1, max_page_size]`. An absent `orderBy` takes the configured default,
    /// while an explicitly empty one means "no order".
    pub fn resolve(self, config: &LibraryConfig) -> AuthorsResourceParameters {
        let pagination = &config.pagination;
        let max_page_size = pagination.max_page_size.max(1);

        let page_number = self
            .page_number
            .map_or(1, |n| usize::try_from(n.max(1)).unwrap_or(usize::MAX));
        let page_size = self
            .page_size
            .map_or(pagination.default_page_size, |n| {
                usize::try_from(n.max(1)).unwrap_or(max_page_size)
            })
            .clamp(1, max_page_size);

        AuthorsResourceParameters {
            fields: self.fields,
            order_by: self
                .order_by
                .unwrap_or_else(|| config.default_order_by.clone()),
            page_number,
            page_size,
            main_category: self.main_category,
            search_query: self.search_query,
        }
    }
}

/// Query string of single-resource endpoints (`?fields=id,name`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FieldsQuery {
    pub fields: Option<String>,
}

impl FieldsQuery {
    /// The field list, or `None` when absent or blank
    pub fn fields(&self) -> Option<&str> {
        self.fields.as_deref().filter(|f| !f.trim().is_empty())
    }
}

/// Resolved author list parameters, with paging values already in range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorsResourceParameters {
    pub fields: Option<String>,
    pub order_by: String,
    pub page_number: usize,
    pub page_size: usize,
    pub main_category: Option<String>,
    pub search_query: Option<String>,
}

impl AuthorsResourceParameters {
    /// The same parameters pointed at another page
    pub fn with_page_number(&self, page_number: usize) -> Self {
        Self {
            page_number,
            ..self.clone()
        }
    }

    /// Storage filter for these parameters
    pub fn filter(&self) -> AuthorFilter {
        AuthorFilter::new(self.main_category.as_deref(), self.search_query.as_deref())
    }

    /// Query pairs in link order, omitting absent values
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(6);
        if let Some(fields) = &self.fields {
            pairs.push(("fields", fields.clone()));
        }
        pairs.push(("orderBy", self.order_by.clone()));
        pairs.push(("pageNumber", self.page_number.to_string()));
        pairs.push(("pageSize", self.page_size.to_string()));
        if let Some(main_category) = &self.main_category {
            pairs.push(("mainCategory", main_category.clone()));
        }
        if let Some(search_query) = &self.search_query {
            pairs.push(("searchQuery", search_query.clone()));
        }
        pairs
    }
}

/// Pagination metadata, sent as JSON in the `X-Pagination` header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Total number of items (after filters)
    pub total_count: usize,

    /// Number of items per page
    pub page_size: usize,

    /// Current page number (starts at 1)
    pub current_page: usize,

    /// Total number of pages
    pub total_pages: usize,
}

impl PaginationMeta {
    /// Header name the metadata travels in
    pub const HEADER: &'static str = "x-pagination";
}
