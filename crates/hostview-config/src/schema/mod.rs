//! Configuration schema types for Hostview.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod bounds;
mod layout;
mod logging;
mod renderer;
mod resize;

pub use bounds::*;
pub use layout::*;
pub use logging::*;
pub use renderer::*;
pub use resize::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Hostview.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct HostviewConfig {
    pub renderer: RendererConfig,
    pub resolution: ResolutionConfig,
    pub viewport: ViewportConfig,
    pub resize: ResizeConfig,
    pub layout: LayoutConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
