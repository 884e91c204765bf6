//! Tests for loading configuration from YAML files
//!
//! These tests verify that:
//! - A configuration file on disk is read and merged with defaults
//! - Invalid files are reported with the right error category
//! - A loaded configuration reaches links and paging at request time

use axum_test::TestServer;
use course_library::core::error::ConfigError;
use course_library::prelude::*;
use serde_json::Value;
use std::io::Write;
use tempfile::NamedTempFile;

fn config_file(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(yaml.as_bytes())
        .expect("Failed to write config");
    file
}

#[test]
fn test_load_from_file() {
    let file = config_file(
        r#"
bind_address: 0.0.0.0:8080
base_url: https://library.example.com
default_order_by: age desc
seed: true
cors: true
pagination:
  default_page_size: 5
  max_page_size: 15
"#,
    );

    let config = LibraryConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(config.bind_address, "0.0.0.0:8080");
    assert_eq!(config.base_url, "https://library.example.com");
    assert_eq!(config.default_order_by, "age desc");
    assert!(config.seed);
    assert!(config.cors);
    assert_eq!(config.pagination.default_page_size, 5);
    assert_eq!(config.pagination.max_page_size, 15);
}

#[test]
fn test_empty_mapping_file_uses_defaults() {
    let file = config_file("{}\n");

    let config = LibraryConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(config, LibraryConfig::default_config());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("library.yaml");

    let err = LibraryConfig::from_yaml_file(&missing).unwrap_err();
    assert!(matches!(err, ConfigError::IoError { .. }));
    assert!(err.to_string().contains("library.yaml"));
}

#[test]
fn test_unknown_value_type_is_parse_error() {
    let file = config_file("pagination:\n  max_page_size: lots\n");

    let err = LibraryConfig::from_yaml_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_zero_max_page_size_is_rejected() {
    let file = config_file("pagination:\n  default_page_size: 0\n  max_page_size: 0\n");

    let err = LibraryConfig::from_yaml_file(file.path()).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidValue { ref field, .. } if field == "pagination.max_page_size"
    ));
}

#[tokio::test]
async fn test_loaded_config_drives_links_and_paging() {
    let file = config_file(
        r#"
base_url: https://library.example.com/v1
default_order_by: age desc
pagination:
  default_page_size: 2
  max_page_size: 4
"#,
    );
    let config = LibraryConfig::from_yaml_file(file.path()).unwrap();

    let app = ServerBuilder::new()
        .with_config(config)
        .with_repository(InMemoryLibraryRepository::with_seed_data().unwrap())
        .register_module(CatalogModule)
        .unwrap()
        .build()
        .unwrap();
    let server = TestServer::new(app);

    let response = server.get("/api/authors").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["value"].as_array().unwrap().len(), 2);
    assert_eq!(body["value"][0]["name"], "Berry Griffin Beak Eldritch");

    let self_href = body["links"][0]["href"].as_str().unwrap();
    assert!(self_href.starts_with("https://library.example.com/v1/api/authors?"));
    assert!(self_href.contains("orderBy=age+desc"));

    let response = server
        .get("/api/authors")
        .add_query_param("pageSize", "10")
        .await;
    let body: Value = response.json();
    assert_eq!(body["value"].as_array().unwrap().len(), 4);
}
