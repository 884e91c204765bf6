//! Author storage entity, projections and creation payloads

use crate::core::error::MappingError;
use crate::core::field::FieldValue;
use crate::core::mapping::PropertyMapping;
use crate::core::store::{AuthorFilter, Filter, Sortable};
use crate::core::validation::{EntityValidationConfig, ValidatableEntity, filters, validators};
use crate::entities::course::{Course, CourseForCreationDto};
use crate::{impl_shape, property_mapping};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An author as stored, with the courses they wrote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: DateTime<Utc>,
    pub date_of_death: Option<DateTime<Utc>>,
    pub main_category: String,
    #[serde(default)]
    pub courses: Vec<Course>,
}

impl Author {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        date_of_birth: DateTime<Utc>,
        main_category: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            date_of_birth,
            date_of_death: None,
            main_category: main_category.into(),
            courses: Vec::new(),
        }
    }

    pub fn with_date_of_death(mut self, date_of_death: DateTime<Utc>) -> Self {
        self.date_of_death = Some(date_of_death);
        self
    }

    /// Display name, "FirstName LastName"
    pub fn name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Age in whole years at `now`, or at the date of death when there is one
    ///
    /// A birthday not yet reached in the final year does not count. Dates in
    /// the future give 0.
    pub fn age_at(&self, now: DateTime<Utc>) -> i32 {
        let end = self.date_of_death.unwrap_or(now);
        let start = self.date_of_birth;

        let mut age = end.year() - start.year();
        if (end.month(), end.day()) < (start.month(), start.day()) {
            age -= 1;
        }
        age.max(0)
    }
}

impl Sortable for Author {
    const ENTITY: &'static str = "author";
    const COLUMNS: &'static [&'static str] = &[
        "Id",
        "FirstName",
        "LastName",
        "DateOfBirth",
        "DateOfDeath",
        "MainCategory",
    ];

    fn column_value(&self, column: &str) -> Option<FieldValue> {
        let value = match column.to_ascii_lowercase().as_str() {
            "id" => self.id.into(),
            "firstname" => self.first_name.as_str().into(),
            "lastname" => self.last_name.as_str().into(),
            "dateofbirth" => self.date_of_birth.into(),
            "dateofdeath" => self.date_of_death.into(),
            "maincategory" => self.main_category.as_str().into(),
            _ => return None,
        };
        Some(value)
    }
}

impl Filter<Author> for AuthorFilter {
    fn matches(&self, author: &Author) -> bool {
        self.category_matches(&author.main_category)
            && self.search_matches([
                author.first_name.as_str(),
                author.last_name.as_str(),
                author.main_category.as_str(),
            ])
    }
}

/// Friendly author representation: combined name and derived age
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub main_category: String,
}

impl_shape!(AuthorDto, {
    "id" => id,
    "name" => name,
    "age" => age,
    "mainCategory" => main_category,
});

impl AuthorDto {
    /// Project `author`, computing the age at `now`
    pub fn from_author_at(author: &Author, now: DateTime<Utc>) -> Self {
        Self {
            id: author.id,
            name: author.name(),
            age: author.age_at(now),
            main_category: author.main_category.clone(),
        }
    }
}

impl From<&Author> for AuthorDto {
    fn from(author: &Author) -> Self {
        Self::from_author_at(author, Utc::now())
    }
}

/// Full author representation: storage columns as they are
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorFullDto {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: DateTime<Utc>,
    pub main_category: String,
}

impl_shape!(AuthorFullDto, {
    "id" => id,
    "firstName" => first_name,
    "lastName" => last_name,
    "dateOfBirth" => date_of_birth,
    "mainCategory" => main_category,
});

impl From<&Author> for AuthorFullDto {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            first_name: author.first_name.clone(),
            last_name: author.last_name.clone(),
            date_of_birth: author.date_of_birth,
            main_category: author.main_category.clone(),
        }
    }
}

/// Sort mapping from [`AuthorDto`] fields to [`Author`] columns
///
/// Age sorts by date of birth in the opposite direction, and name sorts by
/// first then last name.
pub fn author_property_mapping() -> Result<PropertyMapping, MappingError> {
    property_mapping! {
        "Id" => ["Id"],
        "MainCategory" => ["MainCategory"],
        "Age" => revert ["DateOfBirth"],
        "Name" => ["FirstName", "LastName"],
    }
}

/// Body of `POST /api/authors` (`application/json` or the author creation
/// vendor type)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorForCreationDto {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: DateTime<Utc>,
    pub main_category: String,
    #[serde(default)]
    pub courses: Vec<CourseForCreationDto>,
}

impl AuthorForCreationDto {
    pub fn into_author(self) -> Author {
        let mut author = Author::new(
            self.first_name,
            self.last_name,
            self.date_of_birth,
            self.main_category,
        );
        author.courses = attach_courses(author.id, self.courses);
        author
    }
}

impl ValidatableEntity for AuthorForCreationDto {
    fn validation_config() -> EntityValidationConfig {
        author_validation_config("author")
    }
}

/// Body of `POST /api/authors` sent as the "with date of death" vendor type
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorForCreationWithDateOfDeathDto {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: DateTime<Utc>,
    #[serde(default)]
    pub date_of_death: Option<DateTime<Utc>>,
    pub main_category: String,
    #[serde(default)]
    pub courses: Vec<CourseForCreationDto>,
}

impl AuthorForCreationWithDateOfDeathDto {
    pub fn into_author(self) -> Author {
        let mut author = Author::new(
            self.first_name,
            self.last_name,
            self.date_of_birth,
            self.main_category,
        );
        author.date_of_death = self.date_of_death;
        author.courses = attach_courses(author.id, self.courses);
        author
    }
}

impl ValidatableEntity for AuthorForCreationWithDateOfDeathDto {
    fn validation_config() -> EntityValidationConfig {
        let mut config = author_validation_config("author_with_date_of_death");
        config
            .add_filter("dateOfDeath", filters::empty_to_null())
            .add_validator("dateOfDeath", validators::date_time());
        config
    }
}

fn attach_courses(author_id: Uuid, courses: Vec<CourseForCreationDto>) -> Vec<Course> {
    courses
        .into_iter()
        .map(|course| course.into_course(author_id))
        .collect()
}

fn author_validation_config(entity_type: &str) -> EntityValidationConfig {
    let mut config = EntityValidationConfig::new(entity_type);
    for field in ["firstName", "lastName", "mainCategory"] {
        config
            .add_filter(field, filters::trim())
            .add_validator(field, validators::required())
            .add_validator(field, validators::string_length(1, 50));
    }
    config
        .add_validator("dateOfBirth", validators::required())
        .add_validator("dateOfBirth", validators::date_time())
        .add_nested_list("courses", CourseForCreationDto::validation_config());
    config
}
