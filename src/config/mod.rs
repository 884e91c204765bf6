//! Configuration loading and management
//!
//! ```yaml
//! bind_address: 0.0.0.0:3000
//! base_url: http://localhost:3000
//! default_order_by: Name
//! seed: true
//! pagination:
//!   default_page_size: 10
//!   max_page_size: 20
//! ```

use crate::core::error::ConfigError;
use crate::links::RouteRegistry;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the path of the YAML configuration file
pub const CONFIG_ENV_VAR: &str = "COURSE_LIBRARY_CONFIG";

/// Paging limits for list endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size when the client does not ask for one
    pub default_page_size: usize,

    /// Largest page size a client may ask for
    pub max_page_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 20,
        }
    }
}

/// Complete configuration for the course library service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Socket address the server listens on
    pub bind_address: String,

    /// Absolute origin used for hypermedia hrefs and `Location` headers
    pub base_url: String,

    /// Sort expression applied when a list request has no `orderBy`
    pub default_order_by: String,

    /// Populate the repository with demo data at start-up
    pub seed: bool,

    /// Enable a permissive CORS layer
    pub cors: bool,

    pub pagination: PaginationConfig,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl LibraryConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::IoError {
            message: format!("{}: {e}", path.as_ref().display()),
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    ///
    /// Missing keys take their default values.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the file named by [`CONFIG_ENV_VAR`], or fall back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::from_yaml_file(path.trim()),
            _ => Ok(Self::default_config()),
        }
    }

    /// Create a default configuration for development and tests
    pub fn default_config() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            base_url: "http://localhost:3000".to_string(),
            default_order_by: "Name".to_string(),
            seed: false,
            cors: false,
            pagination: PaginationConfig::default(),
        }
    }

    /// Check values serde cannot check
    pub fn validate(&self) -> Result<(), ConfigError> {
        RouteRegistry::new(&self.base_url)?;

        if self.pagination.max_page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pagination.max_page_size".to_string(),
                value: "0".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        if self.pagination.default_page_size == 0
            || self.pagination.default_page_size > self.pagination.max_page_size
        {
            return Err(ConfigError::InvalidValue {
                field: "pagination.default_page_size".to_string(),
                value: self.pagination.default_page_size.to_string(),
                message: format!(
                    "must be between 1 and max_page_size ({})",
                    self.pagination.max_page_size
                ),
            });
        }

        Ok(())
    }
}
