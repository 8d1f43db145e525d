//! Hostview configuration system.
//!
//! TOML-based configuration with full validation. All config sections use
//! defaults so partial configs work out of the box.

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{HostviewConfig, CONFIG_SCHEMA_VERSION};

use hostview_common::ConfigError;
use std::path::Path;

/// Load config from the platform default path and validate it.
pub fn load_config() -> Result<HostviewConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path and validate it.
pub fn load_config_from(path: &Path) -> Result<HostviewConfig, ConfigError> {
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}
