//! # Course Library
//!
//! A hypermedia REST API over an author/course catalog, built around four
//! resource-shaping pieces:
//!
//! - **Property mapping**: public sort fields translated to storage columns
//!   through an explicit, case-insensitive table
//! - **Data shaping**: responses trimmed to a client-selected field list
//! - **Pagination**: bounded windows with `X-Pagination` metadata
//! - **Hypermedia links**: `self`, action and paging links on every resource
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use course_library::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     ServerBuilder::new()
//!         .with_config(LibraryConfig::from_env()?)
//!         .with_repository(InMemoryLibraryRepository::with_seed_data()?)
//!         .register_module(CatalogModule)?
//!         .serve()
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod links;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{LibraryError, LibraryResult},
        field::{FieldDescriptor, FieldValue},
        link::{Link, LinkedCollectionResource},
        mapping::{PropertyMapping, PropertyMappingRegistry, PropertyMappingValue},
        module::Module,
        page::{Page, paginate},
        query::{AuthorsQuery, AuthorsResourceParameters, FieldsQuery, PaginationMeta},
        service::LibraryRepository,
        shape::{Shape, ShapeExt, Shapeable, ShapedRecord, has_fields, shape_many, shape_one},
        sort::{ResolvedOrdering, is_valid_sort_expression, translate},
        store::{AuthorFilter, QueryableStore, Sortable},
        validation::{EntityValidationConfig, ValidatableEntity, Validated},
    };

    // === Macros ===
    pub use crate::{impl_shape, property_mapping};

    // === Entities ===
    pub use crate::entities::{
        Author, AuthorDto, AuthorFullDto, CatalogModule, Course, CourseDto,
    };

    // === Links ===
    pub use crate::links::{LinkAssembler, Route, RouteRegistry};

    // === Storage ===
    pub use crate::storage::InMemoryLibraryRepository;

    // === Config ===
    pub use crate::config::LibraryConfig;

    // === Server ===
    pub use crate::server::{AppState, EntityDescriptor, EntityRegistry, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
