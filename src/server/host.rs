//! Server host for transport-agnostic API exposure
//!
//! The host holds everything the handlers share: the repository, the property
//! mapping registry, the link assembler and the configuration. It is built
//! once by [`ServerBuilder`](super::ServerBuilder) and never mutated.

use crate::config::LibraryConfig;
use crate::core::mapping::PropertyMappingRegistry;
use crate::core::service::LibraryRepository;
use crate::links::assembler::LinkAssembler;
use crate::server::entity_registry::EntityRegistry;
use std::sync::Arc;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn LibraryRepository>,
    pub mappings: Arc<PropertyMappingRegistry>,
    pub links: Arc<LinkAssembler>,
    pub config: Arc<LibraryConfig>,
}

/// Host context containing all framework state
///
/// # Example
///
/// ```rust,ignore
/// let host = ServerBuilder::new()
///     .with_repository(InMemoryLibraryRepository::new())
///     .register_module(CatalogModule)?
///     .build_host()?;
///
/// let app = RestExposure::build_router(Arc::new(host), vec![])?;
/// ```
pub struct ServerHost {
    /// Configuration the host was built from
    pub config: Arc<LibraryConfig>,

    /// Storage for authors and courses
    pub repository: Arc<dyn LibraryRepository>,

    /// Sort mappings registered by the modules
    pub mappings: Arc<PropertyMappingRegistry>,

    /// Hypermedia link assembly rooted at `config.base_url`
    pub links: Arc<LinkAssembler>,

    /// Entity registry for routes
    pub entity_registry: EntityRegistry,
}

impl ServerHost {
    /// Build the host from builder components
    pub fn from_builder_components(
        config: LibraryConfig,
        repository: Arc<dyn LibraryRepository>,
        mappings: PropertyMappingRegistry,
        links: LinkAssembler,
        entity_registry: EntityRegistry,
    ) -> Self {
        Self {
            config: Arc::new(config),
            repository,
            mappings: Arc::new(mappings),
            links: Arc::new(links),
            entity_registry,
        }
    }

    /// Handler state sharing this host's components
    pub fn app_state(&self) -> AppState {
        AppState {
            repository: self.repository.clone(),
            mappings: self.mappings.clone(),
            links: self.links.clone(),
            config: self.config.clone(),
        }
    }

    /// Get entity types registered in the host
    pub fn entity_types(&self) -> Vec<&str> {
        self.entity_registry.entity_types()
    }
}
