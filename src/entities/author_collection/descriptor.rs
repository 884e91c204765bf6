//! Entity descriptor for author collections

use super::handlers::{create_author_collection, get_author_collection};
use crate::links::Route;
use crate::server::entity_registry::EntityDescriptor;
use crate::server::host::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Descriptor for batches of authors created or fetched together
pub struct AuthorCollectionDescriptor;

impl EntityDescriptor for AuthorCollectionDescriptor {
    fn entity_type(&self) -> &str {
        "author_collection"
    }

    fn routes(&self) -> &'static [Route] {
        &[Route::GetAuthorCollection, Route::CreateAuthorCollection]
    }

    fn build_routes(&self, state: AppState) -> Router {
        Router::new()
            .route("/api/authorcollections", post(create_author_collection))
            .route("/api/authorcollections/{ids}", get(get_author_collection))
            .with_state(state)
    }
}
