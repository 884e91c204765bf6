//! Entity registry for managing entity descriptors and their routes

use super::host::AppState;
use crate::links::Route;
use axum::Router;
use indexmap::IndexMap;

/// Trait that describes how to mount one entity's routes
///
/// Each entity (author, course, author collection) implements this trait.
/// `routes` names the entries of the link route table the descriptor serves,
/// so the registry can tell whether every href a client receives is mounted.
pub trait EntityDescriptor: Send + Sync {
    /// The entity type name (singular, e.g., "author")
    fn entity_type(&self) -> &str;

    /// Named routes this descriptor mounts
    fn routes(&self) -> &'static [Route];

    /// Build the router for this entity against the shared state
    fn build_routes(&self, state: AppState) -> Router;
}

/// Registry for all entities in the application
///
/// Descriptors are kept in registration order, which is also the order their
/// routers are merged in.
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: IndexMap<String, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity descriptor, replacing one of the same entity type
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let entity_type = descriptor.entity_type().to_string();
        let routes: Vec<&str> = descriptor.routes().iter().map(|r| r.name()).collect();

        if self.descriptors.insert(entity_type.clone(), descriptor).is_some() {
            tracing::warn!(entity_type, "entity descriptor replaced");
        } else {
            tracing::debug!(entity_type, ?routes, "entity descriptor registered");
        }
    }

    /// Merge every descriptor's router into one
    pub fn build_routes(&self, state: AppState) -> Router {
        self.descriptors
            .values()
            .fold(Router::new(), |router, descriptor| {
                router.merge(descriptor.build_routes(state.clone()))
            })
    }

    /// Registered entity types, in registration order
    pub fn entity_types(&self) -> Vec<&str> {
        self.descriptors.keys().map(String::as_str).collect()
    }

    /// Named routes mounted by some descriptor, in route table order
    pub fn served_routes(&self) -> Vec<Route> {
        Route::ALL
            .into_iter()
            .filter(|route| self.serves(*route))
            .collect()
    }

    /// Named routes no descriptor mounts
    ///
    /// Links built for these routes would point at a 404.
    pub fn missing_routes(&self) -> Vec<Route> {
        Route::ALL
            .into_iter()
            .filter(|route| !self.serves(*route))
            .collect()
    }

    fn serves(&self, route: Route) -> bool {
        self.descriptors
            .values()
            .any(|descriptor| descriptor.routes().contains(&route))
    }
}
