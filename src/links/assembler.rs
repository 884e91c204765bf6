//! Hypermedia link assembly for author resources

use crate::core::link::Link;
use crate::core::query::AuthorsResourceParameters;
use crate::links::registry::{Route, RouteRegistry};
use uuid::Uuid;

/// Builds the link sets attached to author resources and author pages
///
/// Link order and relation names are fixed, so clients can rely on them.
#[derive(Debug, Clone)]
pub struct LinkAssembler {
    routes: RouteRegistry,
}

impl LinkAssembler {
    pub fn new(routes: RouteRegistry) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &RouteRegistry {
        &self.routes
    }

    /// Links for a single author
    ///
    /// The `self` link carries `fields` forward when it is non-blank, so that
    /// following it reproduces the response it came from.
    pub fn links_for(&self, author_id: Uuid, fields: Option<&str>) -> Vec<Link> {
        let id = author_id.to_string();
        let params = [("authorId", id.as_str())];

        let self_query: Vec<(&str, String)> = fields
            .filter(|f| !f.trim().is_empty())
            .map(|f| vec![("fields", f.to_string())])
            .unwrap_or_default();

        vec![
            Link::get(self.routes.href(Route::GetAuthor, &params, &self_query), "self"),
            Link::delete(
                self.routes.href(Route::DeleteAuthor, &params, &[]),
                "delete_author",
            ),
            Link::post(
                self.routes.href(Route::CreateCourseForAuthor, &params, &[]),
                "create_course_for_author",
            ),
            Link::get(
                self.routes.href(Route::GetCoursesForAuthor, &params, &[]),
                "courses",
            ),
        ]
    }

    /// Links for one page of the author list
    ///
    /// `self` reproduces the current parameters; `next-page` and
    /// `previous-page` differ from it only in `pageNumber`.
    pub fn links_for_collection(
        &self,
        parameters: &AuthorsResourceParameters,
        has_next: bool,
        has_previous: bool,
    ) -> Vec<Link> {
        let mut links = vec![Link::get(self.authors_uri(parameters), "self")];

        if has_next {
            let next = parameters.with_page_number(parameters.page_number + 1);
            links.push(Link::get(self.authors_uri(&next), "next-page"));
        }

        if has_previous {
            let previous = parameters.with_page_number(parameters.page_number.saturating_sub(1));
            links.push(Link::get(self.authors_uri(&previous), "previous-page"));
        }

        links
    }

    fn authors_uri(&self, parameters: &AuthorsResourceParameters) -> String {
        self.routes
            .href(Route::GetAuthors, &[], &parameters.query_pairs())
    }

    /// Absolute URL of one author, for `Location` headers
    pub fn author_location(&self, author_id: Uuid) -> String {
        let id = author_id.to_string();
        self.routes.href(Route::GetAuthor, &[("authorId", &id)], &[])
    }

    /// Absolute URL of one course, for `Location` headers
    pub fn course_location(&self, author_id: Uuid, course_id: Uuid) -> String {
        let author = author_id.to_string();
        let course = course_id.to_string();
        self.routes.href(
            Route::GetCourseForAuthor,
            &[("authorId", &author), ("courseId", &course)],
            &[],
        )
    }

    /// Absolute URL of an author collection, for `Location` headers
    pub fn collection_location(&self, author_ids: &[Uuid]) -> String {
        let ids = author_ids
            .iter()
            .map(Uuid::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.routes.href(
            Route::GetAuthorCollection,
            &[("ids", &format!("({ids})"))],
            &[],
        )
    }
}
