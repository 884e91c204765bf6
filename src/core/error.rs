//! Typed error handling for the course library
//!
//! Every failure that can leave a handler is a [`LibraryError`]. Each category
//! carries its own HTTP status and a stable machine-readable code, so the
//! boundary can render a consistent `{code, message, details}` body.
//!
//! # Error Categories
//!
//! - [`MappingError`]: property mapping registry lookups and registrations
//! - [`ShapingError`]: data shaping invariant violations
//! - [`EntityError`]: missing or incomplete resources
//! - [`ValidationError`]: rejected client input
//! - [`StorageError`]: repository failures
//! - [`RequestError`]: malformed requests (ids, media types)
//! - [`ConfigError`]: configuration loading
//!
//! # Example
//!
//! ```rust,ignore
//! let author = state
//!     .repository
//!     .get_author(&author_id)
//!     .await?
//!     .ok_or(EntityError::NotFound { entity_type: "author".into(), id: author_id })?;
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for the course library
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Shaping(#[from] ShapingError),

    #[error(transparent)]
    Entity(#[from] EntityError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl LibraryError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            LibraryError::Mapping(_) => StatusCode::INTERNAL_SERVER_ERROR,
            LibraryError::Shaping(_) => StatusCode::INTERNAL_SERVER_ERROR,
            LibraryError::Entity(e) => e.status_code(),
            LibraryError::Validation(e) => e.status_code(),
            LibraryError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            LibraryError::Request(e) => e.status_code(),
            LibraryError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            LibraryError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            LibraryError::Mapping(e) => e.error_code(),
            LibraryError::Shaping(e) => e.error_code(),
            LibraryError::Entity(e) => e.error_code(),
            LibraryError::Validation(e) => e.error_code(),
            LibraryError::Storage(_) => "STORAGE_ERROR",
            LibraryError::Request(e) => e.error_code(),
            LibraryError::Config(_) => "CONFIG_ERROR",
            LibraryError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            LibraryError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id.to_string()
                }))
            }
            LibraryError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            LibraryError::Validation(ValidationError::InvalidSortExpression { order_by }) => {
                Some(serde_json::json!({ "orderBy": order_by }))
            }
            LibraryError::Validation(ValidationError::InvalidFields { fields }) => {
                Some(serde_json::json!({ "fields": fields }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for LibraryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Mapping Errors
// =============================================================================

/// Errors raised by the property mapping registry
#[derive(Debug, Error)]
pub enum MappingError {
    /// No mapping was registered for this exact source/destination pair
    #[error("Cannot find property mapping for <{source_type}, {destination_type}>")]
    NotFound {
        source_type: &'static str,
        destination_type: &'static str,
    },

    /// A mapping entry with no destination fields
    #[error("Property mapping for '{field}' has no destination fields")]
    EmptyDestination { field: String },

    /// Two entries collide once names are compared case-insensitively
    #[error("Property mapping declares '{field}' more than once")]
    DuplicateField { field: String },
}

impl MappingError {
    pub fn error_code(&self) -> &'static str {
        match self {
            MappingError::NotFound { .. } => "MAPPING_NOT_FOUND",
            MappingError::EmptyDestination { .. } => "MAPPING_EMPTY_DESTINATION",
            MappingError::DuplicateField { .. } => "MAPPING_DUPLICATE_FIELD",
        }
    }
}

// =============================================================================
// Shaping Errors
// =============================================================================

/// Errors raised by the data shaper
///
/// Both variants indicate a caller bug: the field gate should have rejected
/// unknown fields, and sources are never absent in a well-formed request.
#[derive(Debug, Error)]
pub enum ShapingError {
    /// The instance or sequence to shape was absent
    #[error("Cannot shape an absent {source_type}")]
    NullSource { source_type: &'static str },

    /// A requested field does not exist on the source type
    #[error("Property {field} was not found on type {source_type}")]
    UnknownField { field: String, source_type: String },
}

impl ShapingError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ShapingError::NullSource { .. } => "NULL_SOURCE",
            ShapingError::UnknownField { .. } => "UNKNOWN_FIELD",
        }
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to resource lookups
#[derive(Debug, Error)]
pub enum EntityError {
    /// Entity was not found
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: Uuid },

    /// Fewer entities were found than ids requested
    #[error("Requested {requested} {entity_type} ids but found {found}")]
    CollectionIncomplete {
        entity_type: String,
        requested: usize,
        found: usize,
    },
}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::CollectionIncomplete { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::CollectionIncomplete { .. } => "ENTITY_COLLECTION_INCOMPLETE",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The sort expression names a field with no property mapping
    #[error("Invalid sort expression: '{order_by}'")]
    InvalidSortExpression { order_by: String },

    /// The field list names a field the resource does not expose
    #[error("Invalid field list: '{fields}'")]
    InvalidFields { fields: String },

    /// Payload validation failed on one or more fields
    #[error("Validation errors: {}", format_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// Invalid JSON format
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },

    /// Invalid UUID format
    #[error("Invalid UUID format: {value}")]
    InvalidUuid { value: String },
}

/// A single field validation error
#[derive(Debug, Clone, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

fn format_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ValidationError::FieldErrors(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::InvalidSortExpression { .. } => "INVALID_SORT_EXPRESSION",
            ValidationError::InvalidFields { .. } => "INVALID_FIELDS",
            ValidationError::FieldErrors(_) => "VALIDATION_ERROR",
            ValidationError::InvalidJson { .. } => "INVALID_JSON",
            ValidationError::InvalidUuid { .. } => "INVALID_UUID",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to the storage layer
#[derive(Debug, Error)]
pub enum StorageError {
    /// Query execution error
    #[error("Query error: {message}")]
    QueryError { message: String },

    /// An ordering clause referenced a column the entity does not have
    #[error("Unknown column '{column}' on {entity_type}")]
    UnknownColumn { entity_type: String, column: String },
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug, Error)]
pub enum RequestError {
    /// Invalid entity ID format
    #[error("Invalid entity ID format: '{id}'")]
    InvalidEntityId { id: String },

    /// A header that could not be parsed as a media type
    #[error("Invalid media type: '{value}'")]
    InvalidMediaType { value: String },

    /// A media type the resource cannot produce
    #[error("Cannot produce media type '{value}'")]
    NotAcceptable { value: String },

    /// A request body media type the resource cannot consume
    #[error("Unsupported media type: '{value}'")]
    UnsupportedMediaType { value: String },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidEntityId { .. } => StatusCode::BAD_REQUEST,
            RequestError::InvalidMediaType { .. } => StatusCode::BAD_REQUEST,
            RequestError::NotAcceptable { .. } => StatusCode::NOT_ACCEPTABLE,
            RequestError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidEntityId { .. } => "INVALID_ENTITY_ID",
            RequestError::InvalidMediaType { .. } => "INVALID_MEDIA_TYPE",
            RequestError::NotAcceptable { .. } => "NOT_ACCEPTABLE",
            RequestError::UnsupportedMediaType { .. } => "UNSUPPORTED_MEDIA_TYPE",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        LibraryError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for LibraryError {
    fn from(err: serde_yaml::Error) -> Self {
        LibraryError::Config(ConfigError::ParseError {
            message: err.to_string(),
        })
    }
}

impl From<uuid::Error> for LibraryError {
    fn from(err: uuid::Error) -> Self {
        LibraryError::Validation(ValidationError::InvalidUuid {
            value: err.to_string(),
        })
    }
}

/// Repository seams report through `anyhow`; anything that reaches a handler
/// that way is a storage failure.
impl From<anyhow::Error> for LibraryError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<StorageError>() {
            Ok(storage) => LibraryError::Storage(storage),
            Err(other) => LibraryError::Storage(StorageError::QueryError {
                message: other.to_string(),
            }),
        }
    }
}

/// A specialized Result type for course library operations
pub type LibraryResult<T> = Result<T, LibraryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_not_found_display() {
        let err = MappingError::NotFound {
            source_type: "AuthorDto",
            destination_type: "Author",
        };
        assert_eq!(
            err.to_string(),
            "Cannot find property mapping for <AuthorDto, Author>"
        );
    }

    #[test]
    fn test_shaping_errors_are_server_errors() {
        let err: LibraryError = ShapingError::UnknownField {
            field: "shoeSize".to_string(),
            source_type: "AuthorDto".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "UNKNOWN_FIELD");
        assert!(err.to_string().contains("shoeSize"));
    }

    #[test]
    fn test_gate_failures_are_bad_requests() {
        let err: LibraryError = ValidationError::InvalidSortExpression {
            order_by: "shoeSize".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let response = err.to_response();
        assert_eq!(response.code, "INVALID_SORT_EXPRESSION");
        assert_eq!(response.details, Some(serde_json::json!({ "orderBy": "shoeSize" })));
    }

    #[test]
    fn test_field_errors_are_unprocessable() {
        let err = ValidationError::FieldErrors(vec![
            FieldValidationError {
                field: "title".to_string(),
                message: "The title is required.".to_string(),
            },
            FieldValidationError {
                field: "description".to_string(),
                message: "too long".to_string(),
            },
        ]);
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        let display = err.to_string();
        assert!(display.contains("title"));
        assert!(display.contains("description"));
    }

    #[test]
    fn test_entity_not_found_details() {
        let err = LibraryError::Entity(EntityError::NotFound {
            entity_type: "author".to_string(),
            id: Uuid::nil(),
        });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        let response = err.to_response();
        assert_eq!(response.code, "ENTITY_NOT_FOUND");
        assert!(response.details.is_some());
    }

    #[test]
    fn test_request_error_status_codes() {
        assert_eq!(
            RequestError::NotAcceptable {
                value: "text/html".to_string()
            }
            .status_code(),
            StatusCode::NOT_ACCEPTABLE
        );
        assert_eq!(
            RequestError::InvalidMediaType {
                value: "garbage".to_string()
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RequestError::UnsupportedMediaType {
                value: "text/plain".to_string()
            }
            .status_code(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
    }

    #[test]
    fn test_from_anyhow_keeps_storage_error() {
        let err: LibraryError = anyhow::Error::new(StorageError::UnknownColumn {
            entity_type: "author".to_string(),
            column: "ShoeSize".to_string(),
        })
        .into();
        assert!(matches!(
            err,
            LibraryError::Storage(StorageError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: LibraryError = json_err.into();
        assert!(matches!(
            err,
            LibraryError::Validation(ValidationError::InvalidJson { .. })
        ));
    }
}
