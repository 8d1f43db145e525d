//! Reading `config.toml` into a [`HostviewConfig`].

use std::io::ErrorKind;
use std::path::Path;

use crate::schema::HostviewConfig;
use crate::validation;
use hostview_common::ConfigError;

use super::paths::{create_default_config, default_config_path};

/// Parse the file at `path`. A missing file is reported as
/// [`ConfigError::FileNotFound`] so callers can fall back to defaults.
pub fn read_config(path: &Path) -> Result<HostviewConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::FileNotFound(path.to_path_buf()),
        _ => ConfigError::ParseError(format!("{}: {e}", path.display())),
    })?;

    toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("{}: {e}", path.display())))
}

/// Validation problems of a config read from `path`, phrased for the log.
pub(crate) fn validation_notice(path: &Path, config: &HostviewConfig) -> Option<String> {
    validation::validate(config)
        .err()
        .map(|e| format!("{} has out-of-range values, keeping them as written: {e}", path.display()))
}

/// Read and parse `path`.
///
/// Out-of-range values are only logged here; [`crate::load_config_from`]
/// is the entry point that rejects them.
pub fn load_from_path(path: &Path) -> Result<HostviewConfig, ConfigError> {
    let config = read_config(path)?;
    if let Some(notice) = validation_notice(path, &config) {
        tracing::warn!(path = %path.display(), "{notice}");
    }
    tracing::info!(path = %path.display(), "Config read");
    Ok(config)
}

/// Load the per-user config, writing the commented template on first run.
///
/// Windows keeps it under `%APPDATA%\hostview`, Linux under
/// `~/.config/hostview`.
pub fn load_default() -> Result<HostviewConfig, ConfigError> {
    let path = default_config_path()?;
    match load_from_path(&path) {
        Err(ConfigError::FileNotFound(_)) => {
            create_default_config(&path)?;
            Ok(HostviewConfig::default())
        }
        other => other,
    }
}
