//! Where the per-user config lives, and first-run creation of it.

use std::path::{Path, PathBuf};

use hostview_common::ConfigError;

use super::template::default_config_toml;

const APP_DIR: &str = "hostview";
const FILE_NAME: &str = "config.toml";

/// `<platform config dir>/hostview/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|base| base.join(APP_DIR).join(FILE_NAME))
        .ok_or_else(|| ConfigError::ParseError("no per-user config directory on this platform".into()))
}

/// Write the commented template to `path`, creating parent directories.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_failed =
        |e: std::io::Error| ConfigError::ParseError(format!("cannot write {}: {e}", path.display()));

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(write_failed)?;
    }
    std::fs::write(path, default_config_toml()).map_err(write_failed)?;

    tracing::info!(path = %path.display(), "Wrote default config");
    Ok(())
}
