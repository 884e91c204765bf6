//! Module definition for the course catalog
//!
//! The catalog serves authors, their courses, and author collections.

use super::author::{Author, AuthorDescriptor, AuthorDto, author_property_mapping};
use super::author_collection::AuthorCollectionDescriptor;
use super::course::CourseDescriptor;
use crate::core::error::MappingError;
use crate::core::mapping::PropertyMappingRegistryBuilder;
use crate::core::module::Module;
use crate::server::entity_registry::EntityRegistry;

/// Course catalog module
pub struct CatalogModule;

impl Module for CatalogModule {
    fn name(&self) -> &str {
        "course-library"
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn entity_types(&self) -> Vec<&str> {
        vec!["author", "course", "author_collection"]
    }

    fn register_property_mappings(
        &self,
        registry: &mut PropertyMappingRegistryBuilder,
    ) -> Result<(), MappingError> {
        registry.register::<AuthorDto, Author>(author_property_mapping()?);
        Ok(())
    }

    fn register_entities(&self, registry: &mut EntityRegistry) {
        registry.register(Box::new(AuthorDescriptor));
        registry.register(Box::new(CourseDescriptor));
        registry.register(Box::new(AuthorCollectionDescriptor));
    }
}
