//! Full configuration validation.
//!
//! Each domain has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod bounds;
mod helpers;
mod renderer;
mod resize;


use crate::schema::HostviewConfig;
use hostview_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &HostviewConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    renderer::validate_renderer(&mut errors, config);
    bounds::validate_resolution(&mut errors, config);
    bounds::validate_viewport(&mut errors, config);
    resize::validate_resize(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
