//! REST API exposure
//!
//! Consumes a [`ServerHost`] and produces the Axum `Router` the binary serves:
//! health probes, every registered entity's routes and any custom routes,
//! wrapped in request tracing and, when configured, permissive CORS.

use super::super::host::ServerHost;
use anyhow::Result;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Result<Router> {
        let entity_routes = host.entity_registry.build_routes(host.app_state());

        let app = custom_routes
            .into_iter()
            .fold(Self::health_routes(&host).merge(entity_routes), |app, routes| {
                app.merge(routes)
            });

        let app = if host.config.cors {
            app.layer(CorsLayer::permissive())
        } else {
            app
        };

        tracing::debug!(
            entities = ?host.entity_types(),
            cors = host.config.cors,
            "REST router built"
        );
        Ok(app.layer(TraceLayer::new_for_http()))
    }

    /// `/health` and `/healthz`
    ///
    /// The body is fixed when the router is built.
    fn health_routes(host: &ServerHost) -> Router {
        let body = Arc::new(json!({
            "status": "ok",
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "entities": host.entity_types(),
        }));

        let health = move || {
            let body = Arc::clone(&body);
            async move { Json(Value::clone(&body)) }
        };

        Router::new()
            .route("/health", get(health.clone()))
            .route("/healthz", get(health))
    }
}
