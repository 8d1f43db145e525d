//! Value types produced by the planner.

use std::fmt;

use hostview_common::PixelSize;
use hostview_config::schema::{ResolutionConfig, ViewportConfig};

/// On-screen pixel size allotted to the renderer surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    pub width: i32,
    pub height: i32,
    /// Scale relative to the 1920x1080 reference resolution.
    pub scale: f64,
    /// Display DPI relative to 96 DPI.
    pub dpi_scale: f64,
}

impl ViewportSize {
    /// Returned for non-positive input; not a measured value.
    pub const DEGENERATE: Self = Self {
        width: 800,
        height: 600,
        scale: 1.0,
        dpi_scale: 1.0,
    };

    pub fn pixels(&self) -> PixelSize {
        PixelSize::new(self.width, self.height)
    }
}

impl fmt::Display for ViewportSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Viewport: {}x{} (Scale: {:.2}x, DPI: {:.2}x)",
            self.width, self.height, self.scale, self.dpi_scale
        )
    }
}

/// Internal backbuffer resolution chosen for the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderResolution {
    pub width: i32,
    pub height: i32,
    /// Relative quality in `[0, 1]`; higher means more pixels.
    pub quality: f64,
}

impl RenderResolution {
    /// Returned for non-positive input; not a measured value.
    pub const DEGENERATE: Self = Self {
        width: 800,
        height: 600,
        quality: 0.5,
    };

    pub fn pixels(&self) -> PixelSize {
        PixelSize::new(self.width, self.height)
    }
}

impl fmt::Display for RenderResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Render: {}x{} (Quality: {:.0}%)",
            self.width,
            self.height,
            self.quality * 100.0
        )
    }
}

/// Inclusive `[min, max]` bounds on both dimensions.
///
/// Callers are expected to keep `min <= max`; configuration validation
/// enforces it. If violated, the minimum wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeBounds {
    pub min_width: i32,
    pub min_height: i32,
    pub max_width: i32,
    pub max_height: i32,
}

impl SizeBounds {
    pub const fn new(min_width: i32, min_height: i32, max_width: i32, max_height: i32) -> Self {
        Self {
            min_width,
            min_height,
            max_width,
            max_height,
        }
    }

    pub fn clamp_width(&self, width: i32) -> i32 {
        width.min(self.max_width).max(self.min_width)
    }

    pub fn clamp_height(&self, height: i32) -> i32 {
        height.min(self.max_height).max(self.min_height)
    }

    pub fn contains(&self, width: i32, height: i32) -> bool {
        (self.min_width..=self.max_width).contains(&width)
            && (self.min_height..=self.max_height).contains(&height)
    }

    pub fn min_area(&self) -> f64 {
        f64::from(self.min_width) * f64::from(self.min_height)
    }

    pub fn max_area(&self) -> f64 {
        f64::from(self.max_width) * f64::from(self.max_height)
    }
}

impl From<&ResolutionConfig> for SizeBounds {
    fn from(config: &ResolutionConfig) -> Self {
        Self::new(
            config.min_width,
            config.min_height,
            config.max_width,
            config.max_height,
        )
    }
}

impl From<&ViewportConfig> for SizeBounds {
    fn from(config: &ViewportConfig) -> Self {
        Self::new(
            config.min_width,
            config.min_height,
            config.max_width,
            config.max_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_display() {
        let v = ViewportSize {
            width: 1280,
            height: 720,
            scale: 0.6667,
            dpi_scale: 1.25,
        };
        assert_eq!(v.to_string(), "Viewport: 1280x720 (Scale: 0.67x, DPI: 1.25x)");
    }

    #[test]
    fn render_display_shows_percent() {
        let r = RenderResolution {
            width: 1600,
            height: 900,
            quality: 0.83,
        };
        assert_eq!(r.to_string(), "Render: 1600x900 (Quality: 83%)");
    }

    #[test]
    fn bounds_clamp_both_ways() {
        let b = SizeBounds::new(800, 600, 1920, 1080);
        assert_eq!(b.clamp_width(500), 800);
        assert_eq!(b.clamp_width(4000), 1920);
        assert_eq!(b.clamp_height(700), 700);
        assert!(b.contains(800, 1080));
        assert!(!b.contains(799, 600));
    }

    #[test]
    fn inverted_bounds_favor_minimum() {
        let b = SizeBounds::new(1000, 600, 900, 1080);
        assert_eq!(b.clamp_width(950), 1000);
    }

    #[test]
    fn bounds_from_config() {
        let b = SizeBounds::from(&ResolutionConfig::default());
        assert_eq!(b, SizeBounds::new(800, 600, 1920, 1080));
        let v = SizeBounds::from(&ViewportConfig::default());
        assert_eq!(v, SizeBounds::new(320, 240, 7680, 4320));
    }
}
