//! Course HTTP handlers

use super::model::{CourseDto, CourseForCreationDto, CourseForUpdateDto};
use crate::core::error::{EntityError, LibraryResult};
use crate::core::extractors::parse_entity_id;
use crate::core::validation::Validated;
use crate::server::host::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

async fn ensure_author(state: &AppState, author_id: Uuid) -> LibraryResult<()> {
    if state.repository.author_exists(&author_id).await? {
        Ok(())
    } else {
        Err(EntityError::NotFound {
            entity_type: "author".to_string(),
            id: author_id,
        }
        .into())
    }
}

fn course_not_found(course_id: Uuid) -> EntityError {
    EntityError::NotFound {
        entity_type: "course".to_string(),
        id: course_id,
    }
}

pub async fn get_courses_for_author(
    State(state): State<AppState>,
    Path(author_id): Path<String>,
) -> LibraryResult<Json<Vec<CourseDto>>> {
    let author_id = parse_entity_id(&author_id)?;
    ensure_author(&state, author_id).await?;

    let courses = state.repository.get_courses(&author_id).await?;
    Ok(Json(courses.iter().map(CourseDto::from).collect()))
}

pub async fn get_course_for_author(
    State(state): State<AppState>,
    Path((author_id, course_id)): Path<(String, String)>,
) -> LibraryResult<Json<CourseDto>> {
    let author_id = parse_entity_id(&author_id)?;
    let course_id = parse_entity_id(&course_id)?;
    ensure_author(&state, author_id).await?;

    let course = state
        .repository
        .get_course(&author_id, &course_id)
        .await?
        .ok_or_else(|| course_not_found(course_id))?;
    Ok(Json(CourseDto::from(&course)))
}

pub async fn create_course_for_author(
    State(state): State<AppState>,
    Path(author_id): Path<String>,
    Validated(payload): Validated<CourseForCreationDto>,
) -> LibraryResult<Response> {
    let author_id = parse_entity_id(&author_id)?;
    ensure_author(&state, author_id).await?;

    let course = state
        .repository
        .add_course(&author_id, payload.into_course(author_id))
        .await?;
    tracing::info!(%author_id, course_id = %course.id, "course created");

    let location = state.links.course_location(author_id, course.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(CourseDto::from(&course)),
    )
        .into_response())
}

/// Full replacement of a course
///
/// An unknown course ID under an existing author creates the course with that
/// ID (201 with `Location`); a known one is overwritten (204).
pub async fn update_course_for_author(
    State(state): State<AppState>,
    Path((author_id, course_id)): Path<(String, String)>,
    Validated(payload): Validated<CourseForUpdateDto>,
) -> LibraryResult<Response> {
    let author_id = parse_entity_id(&author_id)?;
    let course_id = parse_entity_id(&course_id)?;
    ensure_author(&state, author_id).await?;

    let course = payload.into_course(author_id, course_id);
    let created = state
        .repository
        .upsert_course(&author_id, course.clone())
        .await?;

    if !created {
        tracing::info!(%author_id, %course_id, "course updated");
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    tracing::info!(%author_id, %course_id, "course created by upsert");
    let location = state.links.course_location(author_id, course_id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(CourseDto::from(&course)),
    )
        .into_response())
}

pub async fn delete_course_for_author(
    State(state): State<AppState>,
    Path((author_id, course_id)): Path<(String, String)>,
) -> LibraryResult<StatusCode> {
    let author_id = parse_entity_id(&author_id)?;
    let course_id = parse_entity_id(&course_id)?;
    ensure_author(&state, author_id).await?;

    if !state.repository.delete_course(&author_id, &course_id).await? {
        return Err(course_not_found(course_id).into());
    }
    tracing::info!(%author_id, %course_id, "course deleted");
    Ok(StatusCode::NO_CONTENT)
}
