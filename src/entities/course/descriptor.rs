//! Entity descriptor for Course

use super::handlers::{
    create_course_for_author, delete_course_for_author, get_course_for_author,
    get_courses_for_author, update_course_for_author,
};
use crate::links::Route;
use crate::server::entity_registry::EntityDescriptor;
use crate::server::host::AppState;
use axum::{Router, routing::get};

/// Descriptor for the Course entity, nested under its author
pub struct CourseDescriptor;

impl EntityDescriptor for CourseDescriptor {
    fn entity_type(&self) -> &str {
        "course"
    }

    fn routes(&self) -> &'static [Route] {
        &[
            Route::GetCoursesForAuthor,
            Route::CreateCourseForAuthor,
            Route::GetCourseForAuthor,
            Route::UpdateCourseForAuthor,
            Route::DeleteCourseForAuthor,
        ]
    }

    fn build_routes(&self, state: AppState) -> Router {
        Router::new()
            .route(
                "/api/authors/{author_id}/courses",
                get(get_courses_for_author).post(create_course_for_author),
            )
            .route(
                "/api/authors/{author_id}/courses/{course_id}",
                get(get_course_for_author)
                    .put(update_course_for_author)
                    .delete(delete_course_for_author),
            )
            .with_state(state)
    }
}
