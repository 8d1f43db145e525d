//! Resolution and viewport planning.
//!
//! Pure functions only: no I/O, no state. [`ResolutionPlanner`] bundles the
//! configured bounds with the active viewport policy so callers can plan
//! both sizes from one measurement.

mod resolution;
mod types;
mod viewport;

pub use resolution::{
    custom_resolution, plan_resolution, score_entry, CatalogEntry, ASPECT_WEIGHT,
    QUALITY_WEIGHT, SPACE_WEIGHT, STANDARD_RESOLUTIONS,
};
pub use types::{RenderResolution, SizeBounds, ViewportSize};
pub use viewport::{
    aspect_constrained, dpi_scaled, fill_available, safe_area, ViewportPolicy,
    DEFAULT_SAFE_MARGIN, REFERENCE_HEIGHT, REFERENCE_WIDTH,
};

use hostview_common::PixelSize;
use hostview_config::HostviewConfig;

/// Viewport and render resolution planned for one available area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plan {
    pub viewport: ViewportSize,
    pub render: RenderResolution,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolutionPlanner {
    pub viewport_bounds: SizeBounds,
    pub resolution_bounds: SizeBounds,
    pub policy: ViewportPolicy,
    /// Viewport planned when nothing was measured.
    pub default_viewport: PixelSize,
}

impl ResolutionPlanner {
    pub fn new(viewport_bounds: SizeBounds, resolution_bounds: SizeBounds) -> Self {
        Self {
            viewport_bounds,
            resolution_bounds,
            policy: ViewportPolicy::FillAvailable,
            default_viewport: ViewportSize::DEGENERATE.pixels(),
        }
    }

    pub fn from_config(config: &HostviewConfig) -> Self {
        Self::new(
            SizeBounds::from(&config.viewport),
            SizeBounds::from(&config.resolution),
        )
        .with_default_viewport(PixelSize::new(
            config.viewport.default_width,
            config.viewport.default_height,
        ))
    }

    /// Non-positive sizes are ignored.
    pub fn with_default_viewport(mut self, size: PixelSize) -> Self {
        if size.is_positive() {
            self.default_viewport = size;
        }
        self
    }

    pub fn with_policy(mut self, policy: ViewportPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Plan for an available area given in physical pixels.
    ///
    /// An empty area plans the configured default viewport.
    pub fn plan(&self, available: PixelSize, dpi_scale: f64) -> Plan {
        let (width, height) = (f64::from(available.width), f64::from(available.height));
        let viewport = if available.is_positive() {
            self.policy
                .compute(width, height, dpi_scale, &self.viewport_bounds)
        } else {
            ViewportSize {
                width: self.default_viewport.width,
                height: self.default_viewport.height,
                ..ViewportSize::DEGENERATE
            }
        };
        Plan {
            viewport,
            render: plan_resolution(width, height, &self.resolution_bounds),
        }
    }
}

impl Default for ResolutionPlanner {
    fn default() -> Self {
        Self::from_config(&HostviewConfig::default())
    }
}
