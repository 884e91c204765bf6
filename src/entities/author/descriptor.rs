//! Entity descriptor for Author

use super::handlers::{create_author, delete_author, get_author, get_authors, options_authors};
use crate::links::Route;
use crate::server::entity_registry::EntityDescriptor;
use crate::server::host::AppState;
use axum::{Router, routing::get};

/// Descriptor for the Author entity
pub struct AuthorDescriptor;

impl EntityDescriptor for AuthorDescriptor {
    fn entity_type(&self) -> &str {
        "author"
    }

    fn routes(&self) -> &'static [Route] {
        &[Route::GetAuthors, Route::GetAuthor, Route::DeleteAuthor]
    }

    fn build_routes(&self, state: AppState) -> Router {
        Router::new()
            .route(
                "/api/authors",
                get(get_authors)
                    .post(create_author)
                    .options(options_authors),
            )
            .route(
                "/api/authors/{author_id}",
                get(get_author).delete(delete_author),
            )
            .with_state(state)
    }
}
