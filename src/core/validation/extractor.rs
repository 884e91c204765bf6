//! Axum extractor for validated payloads
//!
//! This module provides the `Validated<T>` extractor that filters and
//! validates a JSON request body, then deserializes it into `T`.

use super::config::EntityValidationConfig;
use crate::core::error::{LibraryError, RequestError, ValidationError};
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Trait for payload types that carry validation rules
pub trait ValidatableEntity {
    /// Get the validation configuration for this payload type
    fn validation_config() -> EntityValidationConfig;
}

impl<T: ValidatableEntity> ValidatableEntity for Vec<T> {
    fn validation_config() -> EntityValidationConfig {
        EntityValidationConfig::list_of(T::validation_config())
    }
}

/// Axum extractor that validates and filters a payload
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_course_for_author(
///     Path(author_id): Path<String>,
///     Validated(course): Validated<CourseForCreationDto>,
/// ) -> LibraryResult<Response> {
///     // course passed every rule
/// }
/// ```
///
/// Rejections are [`LibraryError`]s: a body that is not JSON is a 400 (415
/// without a JSON content type), and rule failures are a 422 listing every
/// failed field.
#[derive(Debug, Clone)]
pub struct Validated<T>(pub T);

impl<T> Validated<T> {
    /// Get the inner payload
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Validated<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: ValidatableEntity + DeserializeOwned + Send + Sync,
{
    type Rejection = LibraryError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload): Json<Value> = Json::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        validate_payload(payload).map(Validated)
    }
}

/// Filter and validate `payload` with `T`'s rules, then deserialize it
///
/// For handlers that pick the payload type at runtime (for instance from the
/// `Content-Type` header) and so cannot use [`Validated`].
pub fn validate_payload<T>(payload: Value) -> Result<T, LibraryError>
where
    T: ValidatableEntity + DeserializeOwned,
{
    let config = T::validation_config();
    let filtered = config.validate_and_filter(payload).map_err(|errors| {
        tracing::debug!(
            payload = config.entity_type(),
            failures = errors.len(),
            "payload validation failed"
        );
        ValidationError::FieldErrors(errors)
    })?;

    Ok(serde_json::from_value(filtered)?)
}

fn rejection_to_error(rejection: JsonRejection) -> LibraryError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => RequestError::UnsupportedMediaType {
            value: "missing or non-JSON Content-Type".to_string(),
        }
        .into(),
        other => ValidationError::InvalidJson {
            message: other.body_text(),
        }
        .into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::validators;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        title: String,
    }

    impl ValidatableEntity for Probe {
        fn validation_config() -> EntityValidationConfig {
            let mut config = EntityValidationConfig::new("probe");
            config.add_validator("title", validators::required());
            config
        }
    }

    fn json_request(body: &str) -> Request {
        HttpRequest::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_payload() {
        let Validated(probe) = Validated::<Probe>::from_request(json_request(r#"{"title":"Rum"}"#), &())
            .await
            .unwrap();
        assert_eq!(probe.title, "Rum");
    }

    #[tokio::test]
    async fn test_rule_failure_is_unprocessable() {
        let err = Validated::<Probe>::from_request(json_request(r#"{"title":""}"#), &())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let err = Validated::<Probe>::from_request(json_request("{"), &())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_payload() {
        let Validated(probes) =
            Validated::<Vec<Probe>>::from_request(json_request(r#"[{"title":"a"},{"title":"b"}]"#), &())
                .await
                .unwrap();
        assert_eq!(probes.len(), 2);
    }
}
