//! Author HTTP handlers
//!
//! List and single reads validate their query first, then query storage, then
//! project, shape and link, in that order.

use super::model::{
    Author, AuthorDto, AuthorForCreationDto, AuthorForCreationWithDateOfDeathDto, AuthorFullDto,
};
use crate::core::error::{EntityError, LibraryError, LibraryResult, ValidationError};
use crate::core::extractors::{
    AcceptedMediaType, AuthorCreationKind, AuthorRepresentation, parse_entity_id,
};
use crate::core::link::LinkedCollectionResource;
use crate::core::query::{AuthorsQuery, FieldsQuery, PaginationMeta};
use crate::core::shape::{Shape, ShapeExt, ShapedRecord, has_fields, shape_many};
use crate::core::sort::translate;
use crate::core::validation::validate_payload;
use crate::server::host::AppState;
use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Field gate for projection `T`
fn check_fields<T: Shape>(fields: Option<&str>) -> Result<(), ValidationError> {
    match fields {
        Some(fields) if !has_fields::<T>(fields) => {
            warn!(fields, projection = T::type_name(), "rejected unknown fields");
            Err(ValidationError::InvalidFields {
                fields: fields.to_string(),
            })
        }
        _ => Ok(()),
    }
}

fn author_not_found(author_id: Uuid) -> LibraryError {
    EntityError::NotFound {
        entity_type: "author".to_string(),
        id: author_id,
    }
    .into()
}

/// `GET|HEAD /api/authors`
///
/// The body is `{value, links}`; paging metadata travels in `X-Pagination`.
pub async fn get_authors(
    State(state): State<AppState>,
    Query(query): Query<AuthorsQuery>,
) -> LibraryResult<Response> {
    let parameters = query.resolve(&state.config);
    debug!(
        order_by = %parameters.order_by,
        fields = ?parameters.fields,
        page_number = parameters.page_number,
        page_size = parameters.page_size,
        "listing authors"
    );

    if !state
        .mappings
        .valid_mapping_exists_for::<AuthorDto, Author>(&parameters.order_by)?
    {
        warn!(order_by = %parameters.order_by, "rejected unknown sort field");
        return Err(ValidationError::InvalidSortExpression {
            order_by: parameters.order_by,
        }
        .into());
    }
    check_fields::<AuthorDto>(parameters.fields.as_deref())?;

    let mapping = state.mappings.get_mapping::<AuthorDto, Author>()?;
    let ordering = translate(&parameters.order_by, mapping);

    let now = Utc::now();
    let page = state
        .repository
        .get_author_page(
            &parameters.filter(),
            &ordering,
            parameters.page_number,
            parameters.page_size,
        )
        .await?
        .map(|author| AuthorDto::from_author_at(&author, now));

    let shaped = shape_many(Some(page.items()), parameters.fields.as_deref())?;
    let value: Vec<ShapedRecord> = shaped
        .into_iter()
        .zip(page.items())
        .map(|(record, author)| record.with_links(state.links.links_for(author.id, None)))
        .collect();

    let links = state
        .links
        .links_for_collection(&parameters, page.has_next(), page.has_previous());
    let metadata = serde_json::to_string(&page.metadata())?;

    Ok((
        [(PaginationMeta::HEADER, metadata)],
        Json(LinkedCollectionResource::new(value, links)),
    )
        .into_response())
}

/// `OPTIONS /api/authors`
pub async fn options_authors() -> impl IntoResponse {
    (StatusCode::OK, [(header::ALLOW, "GET,OPTIONS,POST")])
}

/// `GET /api/authors/{authorId}`
///
/// The `Accept` header selects the projection and whether links are included;
/// the response `Content-Type` echoes the negotiated media type.
pub async fn get_author(
    State(state): State<AppState>,
    Path(author_id): Path<String>,
    Query(query): Query<FieldsQuery>,
    accepted: AcceptedMediaType,
) -> LibraryResult<Response> {
    let author_id = parse_entity_id(&author_id)?;
    let fields = query.fields();

    match accepted.representation {
        AuthorRepresentation::Friendly => check_fields::<AuthorDto>(fields)?,
        AuthorRepresentation::Full => check_fields::<AuthorFullDto>(fields)?,
    }

    let author = state
        .repository
        .get_author(&author_id)
        .await?
        .ok_or_else(|| author_not_found(author_id))?;

    let mut record = match accepted.representation {
        AuthorRepresentation::Friendly => AuthorDto::from(&author).shape(fields)?,
        AuthorRepresentation::Full => AuthorFullDto::from(&author).shape(fields)?,
    };
    if accepted.include_links {
        record = record.with_links(state.links.links_for(author.id, fields));
    }

    Ok((
        [(header::CONTENT_TYPE, accepted.content_type)],
        Json(record),
    )
        .into_response())
}

/// `POST /api/authors`
///
/// The payload type follows the `Content-Type` header, so the body is read
/// raw and validated once the type is known.
pub async fn create_author(
    State(state): State<AppState>,
    kind: AuthorCreationKind,
    body: Bytes,
) -> LibraryResult<Response> {
    let payload: Value = serde_json::from_slice(&body)?;
    let author = match kind {
        AuthorCreationKind::Standard => validate_payload::<AuthorForCreationDto>(payload)?.into_author(),
        AuthorCreationKind::WithDateOfDeath => {
            validate_payload::<AuthorForCreationWithDateOfDeathDto>(payload)?.into_author()
        }
    };

    let author = state.repository.add_author(author).await?;
    info!(author_id = %author.id, courses = author.courses.len(), "author created");

    let record = AuthorDto::from(&author)
        .shape(None)?
        .with_links(state.links.links_for(author.id, None));

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, state.links.author_location(author.id))],
        Json(record),
    )
        .into_response())
}

/// `DELETE /api/authors/{authorId}`, removing the author's courses too
pub async fn delete_author(
    State(state): State<AppState>,
    Path(author_id): Path<String>,
) -> LibraryResult<StatusCode> {
    let author_id = parse_entity_id(&author_id)?;

    if !state.repository.delete_author(&author_id).await? {
        return Err(author_not_found(author_id));
    }
    info!(%author_id, "author deleted");
    Ok(StatusCode::NO_CONTENT)
}
