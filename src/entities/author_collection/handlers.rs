//! Author collection HTTP handlers
//!
//! A collection is addressed by its member ids, `(id1,id2,...)`.

use crate::core::error::{EntityError, LibraryResult};
use crate::core::extractors::parse_id_list;
use crate::core::validation::Validated;
use crate::entities::author::{AuthorDto, AuthorForCreationDto};
use crate::server::host::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

/// `GET /api/authorcollections/({ids})`
///
/// Every id must resolve; a partial match is a 404.
pub async fn get_author_collection(
    State(state): State<AppState>,
    Path(ids): Path<String>,
) -> LibraryResult<Json<Vec<AuthorDto>>> {
    let author_ids = parse_id_list(&ids)?;
    let authors = state.repository.get_authors_by_ids(&author_ids).await?;

    if authors.len() != author_ids.len() {
        return Err(EntityError::CollectionIncomplete {
            entity_type: "author".to_string(),
            requested: author_ids.len(),
            found: authors.len(),
        }
        .into());
    }

    Ok(Json(authors.iter().map(AuthorDto::from).collect()))
}

/// `POST /api/authorcollections`
pub async fn create_author_collection(
    State(state): State<AppState>,
    Validated(payload): Validated<Vec<AuthorForCreationDto>>,
) -> LibraryResult<Response> {
    let mut created = Vec::with_capacity(payload.len());
    for author in payload {
        created.push(state.repository.add_author(author.into_author()).await?);
    }

    let author_ids: Vec<Uuid> = created.iter().map(|author| author.id).collect();
    tracing::info!(count = author_ids.len(), "author collection created");

    let body: Vec<AuthorDto> = created.iter().map(AuthorDto::from).collect();
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, state.links.collection_location(&author_ids))],
        Json(body),
    )
        .into_response())
}
