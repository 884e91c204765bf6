//! ServerBuilder for fluent API to build HTTP servers

use super::entity_registry::EntityRegistry;
use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::config::LibraryConfig;
use crate::core::mapping::{PropertyMappingRegistry, PropertyMappingRegistryBuilder};
use crate::core::module::Module;
use crate::core::service::LibraryRepository;
use crate::links::{LinkAssembler, RouteRegistry};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for creating HTTP servers with auto-registered routes
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(LibraryConfig::from_env()?)
///     .with_repository(InMemoryLibraryRepository::new())
///     .register_module(CatalogModule)?
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: LibraryConfig,
    repository: Option<Arc<dyn LibraryRepository>>,
    entity_registry: EntityRegistry,
    mappings: PropertyMappingRegistryBuilder,
    modules: Vec<Arc<dyn Module>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            config: LibraryConfig::default_config(),
            repository: None,
            entity_registry: EntityRegistry::new(),
            mappings: PropertyMappingRegistry::builder(),
            modules: Vec::new(),
            custom_routes: Vec::new(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: LibraryConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the repository (required)
    pub fn with_repository(mut self, repository: impl LibraryRepository + 'static) -> Self {
        self.repository = Some(Arc::new(repository));
        self
    }

    /// Set an already shared repository (required)
    pub fn with_shared_repository(mut self, repository: Arc<dyn LibraryRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Add custom routes to the server
    ///
    /// Use this for routes outside the entity descriptors, such as a root
    /// document or operational endpoints.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Register a module
    ///
    /// This will:
    /// 1. Register the module's property mappings
    /// 2. Register all entities from the module
    pub fn register_module(mut self, module: impl Module + 'static) -> Result<Self> {
        let module = Arc::new(module);

        module.register_property_mappings(&mut self.mappings)?;
        module.register_entities(&mut self.entity_registry);

        tracing::debug!(
            module = module.name(),
            version = module.version(),
            entities = ?module.entity_types(),
            "registered module"
        );
        self.modules.push(module);

        Ok(self)
    }

    /// Build the transport-agnostic host
    ///
    /// Validates the configuration and fails when no repository was set.
    pub fn build_host(mut self) -> Result<ServerHost> {
        self.config.validate()?;

        let repository = self
            .repository
            .take()
            .ok_or_else(|| anyhow::anyhow!("A repository is required. Call .with_repository()"))?;

        let links = LinkAssembler::new(RouteRegistry::new(&self.config.base_url)?);

        let missing: Vec<&str> = self
            .entity_registry
            .missing_routes()
            .into_iter()
            .map(|route| route.name())
            .collect();
        if !missing.is_empty() {
            tracing::warn!(?missing, "links will point at routes no module mounts");
        }

        let modules: Vec<&str> = self.modules.iter().map(|m| m.name()).collect();
        tracing::info!(
            ?modules,
            base_url = %self.config.base_url,
            "server host built"
        );

        Ok(ServerHost::from_builder_components(
            self.config,
            repository,
            self.mappings.build(),
            links,
            self.entity_registry,
        ))
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        RestExposure::build_router(host, custom_routes)
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to `bind_address` from the configuration
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    ///
    /// # Example
    ///
    /// ```ignore
    /// ServerBuilder::new()
    ///     .with_repository(InMemoryLibraryRepository::new())
    ///     .register_module(CatalogModule)?
    ///     .serve().await?;
    /// ```
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.bind_address.clone();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for Ctrl+C or SIGTERM
///
/// A signal handler that cannot be installed never fires; the other one
/// still can.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
