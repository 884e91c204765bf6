//! Course library server
//!
//! Reads the configuration from the file named by `COURSE_LIBRARY_CONFIG`
//! (defaults otherwise) and serves the catalog until Ctrl+C or SIGTERM.

use course_library::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("course_library=info,tower_http=info")),
        )
        .init();

    let config = LibraryConfig::from_env()?;

    let repository = if config.seed {
        InMemoryLibraryRepository::with_seed_data()?
    } else {
        InMemoryLibraryRepository::new()
    };

    tracing::info!(
        bind_address = %config.bind_address,
        base_url = %config.base_url,
        seed = config.seed,
        "starting course library"
    );

    ServerBuilder::new()
        .with_config(config)
        .with_repository(repository)
        .register_module(CatalogModule)?
        .serve()
        .await
}
