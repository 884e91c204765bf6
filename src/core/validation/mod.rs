//! Validation and filtering system
//!
//! This module provides a declarative approach to validating and filtering
//! request payloads before they reach the handlers.

pub mod config;
pub mod extractor;
pub mod filters;
pub mod validators;

pub use config::EntityValidationConfig;
pub use extractor::{ValidatableEntity, Validated, validate_payload};
