//! Named route table for building absolute hrefs
//!
//! Every route the API exposes has a name and a path template. Templates use
//! the router's `{param}` syntax, so the same table drives both the router and
//! the hrefs handed to clients.

use crate::core::error::ConfigError;
use url::Url;

/// A named route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    GetAuthors,
    GetAuthor,
    DeleteAuthor,
    GetCoursesForAuthor,
    CreateCourseForAuthor,
    GetCourseForAuthor,
    UpdateCourseForAuthor,
    DeleteCourseForAuthor,
    GetAuthorCollection,
    CreateAuthorCollection,
}

impl Route {
    /// Every named route, in table order
    pub const ALL: [Route; 10] = [
        Route::GetAuthors,
        Route::GetAuthor,
        Route::DeleteAuthor,
        Route::GetCoursesForAuthor,
        Route::CreateCourseForAuthor,
        Route::GetCourseForAuthor,
        Route::UpdateCourseForAuthor,
        Route::DeleteCourseForAuthor,
        Route::GetAuthorCollection,
        Route::CreateAuthorCollection,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Route::GetAuthors => "GetAuthors",
            Route::GetAuthor => "GetAuthor",
            Route::DeleteAuthor => "DeleteAuthor",
            Route::GetCoursesForAuthor => "GetCoursesForAuthor",
            Route::CreateCourseForAuthor => "CreateCourseForAuthor",
            Route::GetCourseForAuthor => "GetCourseForAuthor",
            Route::UpdateCourseForAuthor => "UpdateCourseForAuthor",
            Route::DeleteCourseForAuthor => "DeleteCourseForAuthor",
            Route::GetAuthorCollection => "GetAuthorCollection",
            Route::CreateAuthorCollection => "CreateAuthorCollection",
        }
    }

    /// Path template relative to the API origin
    pub fn template(self) -> &'static str {
        match self {
            Route::GetAuthors => "/api/authors",
            Route::GetAuthor | Route::DeleteAuthor => "/api/authors/{authorId}",
            Route::GetCoursesForAuthor | Route::CreateCourseForAuthor => {
                "/api/authors/{authorId}/courses"
            }
            Route::GetCourseForAuthor
            | Route::UpdateCourseForAuthor
            | Route::DeleteCourseForAuthor => {
                "/api/authors/{authorId}/courses/{courseId}"
            }
            Route::GetAuthorCollection => "/api/authorcollections/{ids}",
            Route::CreateAuthorCollection => "/api/authorcollections",
        }
    }
}

/// Resolves named routes to absolute URLs under a fixed origin
#[derive(Debug, Clone)]
pub struct RouteRegistry {
    base: Url,
}

impl RouteRegistry {
    /// Create a registry rooted at `base_url` (e.g. `http://localhost:3000`)
    ///
    /// A path on the base URL is kept as a prefix for every route.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let base = Url::parse(base_url).map_err(|err| ConfigError::InvalidValue {
            field: "base_url".to_string(),
            value: base_url.to_string(),
            message: err.to_string(),
        })?;

        if base.cannot_be_a_base() {
            return Err(ConfigError::InvalidValue {
                field: "base_url".to_string(),
                value: base_url.to_string(),
                message: "must be an absolute http(s) origin".to_string(),
            });
        }

        Ok(Self { base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Build the absolute URL for `route`
    ///
    /// `params` fill the `{name}` placeholders of the template. `query` pairs
    /// are appended in order; no `?` is emitted when there are none.
    pub fn href(&self, route: Route, params: &[(&str, &str)], query: &[(&str, String)]) -> String {
        let mut path = route.template().to_string();
        for (name, value) in params {
            path = path.replace(&format!("{{{name}}}"), value);
        }

        let prefix = self.base.path().trim_end_matches('/');
        let mut url = self.base.clone();
        url.set_path(&format!("{prefix}{path}"));
        url.set_query(None);
        url.set_fragment(None);

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        url.into()
    }
}
