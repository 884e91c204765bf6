//! Course storage entity, projection and creation payload

use crate::core::validation::{EntityValidationConfig, ValidatableEntity, filters, validators};
use crate::impl_shape;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A course as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub description: Option<String>,
}

impl Course {
    pub fn new(author_id: Uuid, title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            title: title.into(),
            description,
        }
    }
}

/// Public course representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDto {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub description: Option<String>,
}

impl_shape!(CourseDto, {
    "id" => id,
    "authorId" => author_id,
    "title" => title,
    "description" => description,
});

impl From<&Course> for CourseDto {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            author_id: course.author_id,
            title: course.title.clone(),
            description: course.description.clone(),
        }
    }
}

/// Body of `POST /api/authors/{authorId}/courses`, also nested in author payloads
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseForCreationDto {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CourseForCreationDto {
    pub fn into_course(self, author_id: Uuid) -> Course {
        Course::new(author_id, self.title, self.description)
    }
}

/// Body of `PUT /api/authors/{authorId}/courses/{courseId}`
///
/// A full replacement: an omitted description clears the stored one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseForUpdateDto {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CourseForUpdateDto {
    /// The stored course this payload describes, keeping the path IDs
    pub fn into_course(self, author_id: Uuid, course_id: Uuid) -> Course {
        Course {
            id: course_id,
            author_id,
            title: self.title,
            description: self.description,
        }
    }
}

impl ValidatableEntity for CourseForCreationDto {
    fn validation_config() -> EntityValidationConfig {
        course_validation_config()
    }
}

impl ValidatableEntity for CourseForUpdateDto {
    fn validation_config() -> EntityValidationConfig {
        course_validation_config()
    }
}

/// Rules shared by every course payload
fn course_validation_config() -> EntityValidationConfig {
    let mut config = EntityValidationConfig::new("course");
    config
        .add_filter("title", filters::trim())
        .add_filter("description", filters::trim())
        .add_filter("description", filters::empty_to_null())
        .add_validator("title", validators::required())
        .add_validator("title", validators::max_length(100))
        .add_validator("description", validators::max_length(1500))
        .add_record_validator(
            "title",
            validators::fields_differ(
                "title",
                "description",
                "Title must be different from description.",
            ),
        );
    config
}
