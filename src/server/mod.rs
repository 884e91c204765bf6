//! Server module for building HTTP servers with auto-registered routes
//!
//! This module provides a `ServerBuilder` that collects modules, builds the
//! shared `ServerHost`, and exposes it over REST.

pub mod builder;
pub mod entity_registry;
pub mod exposure;
pub mod host;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry};
pub use host::{AppState, ServerHost};
