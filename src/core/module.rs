//! Module system
//!
//! A module bundles the entities it serves with the property mappings their
//! list endpoints sort by.

use crate::core::error::MappingError;
use crate::core::mapping::PropertyMappingRegistryBuilder;
use crate::server::entity_registry::EntityRegistry;

/// Trait for a catalog module
pub trait Module: Send + Sync {
    /// Unique module name
    fn name(&self) -> &str;

    /// Module version
    fn version(&self) -> &str {
        "1.0.0"
    }

    /// List of entity types managed by this module
    fn entity_types(&self) -> Vec<&str>;

    /// Register the `(source, destination)` property mappings of this module
    ///
    /// Called once at startup, before any route is built. A mapping table
    /// that fails to build aborts startup.
    fn register_property_mappings(
        &self,
        registry: &mut PropertyMappingRegistryBuilder,
    ) -> Result<(), MappingError>;

    /// Register entities with the entity registry
    ///
    /// Each entity descriptor provides the routes for that entity.
    fn register_entities(&self, registry: &mut EntityRegistry);
}
