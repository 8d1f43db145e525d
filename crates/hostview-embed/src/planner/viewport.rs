//! Viewport sizing policies.
//!
//! Each policy maps an available area to the on-screen viewport size. The
//! synchronizer uses [`ViewportPolicy::FillAvailable`]; the others are kept
//! selectable so a host can letterbox or inset the renderer.

use super::types::{SizeBounds, ViewportSize};

pub const REFERENCE_WIDTH: f64 = 1920.0;
pub const REFERENCE_HEIGHT: f64 = 1080.0;

const DPI_SCALE_RANGE: (f64, f64) = (0.5, 2.0);
const ASPECT_SCALE_RANGE: (f64, f64) = (0.25, 4.0);
const MAX_SAFE_MARGIN: f64 = 0.45;

/// Default inset used by [`ViewportPolicy::SafeArea`].
pub const DEFAULT_SAFE_MARGIN: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ViewportPolicy {
    /// Use the whole area.
    #[default]
    FillAvailable,
    /// Scale logical units by DPI, optionally forcing an aspect ratio.
    DpiScaled { target_aspect: Option<f64> },
    /// Letterbox to a preferred aspect ratio, never exceeding the area.
    AspectConstrained { preferred_aspect: Option<f64> },
    /// Inset every edge by `margin` (a fraction of each side).
    SafeArea { margin: f64 },
}

impl ViewportPolicy {
    pub fn compute(
        &self,
        available_width: f64,
        available_height: f64,
        dpi_scale: f64,
        bounds: &SizeBounds,
    ) -> ViewportSize {
        match *self {
            Self::FillAvailable => fill_available(available_width, available_height, dpi_scale, bounds),
            Self::DpiScaled { target_aspect } => {
                dpi_scaled(available_width, available_height, dpi_scale, target_aspect, bounds)
            }
            Self::AspectConstrained { preferred_aspect } => aspect_constrained(
                available_width,
                available_height,
                dpi_scale,
                preferred_aspect,
                bounds,
            ),
            Self::SafeArea { margin } => {
                safe_area(available_width, available_height, margin, dpi_scale, bounds)
            }
        }
    }
}

/// Viewport equal to the available pixel area, clamped to `bounds`.
pub fn fill_available(
    available_width: f64,
    available_height: f64,
    dpi_scale: f64,
    bounds: &SizeBounds,
) -> ViewportSize {
    if !usable(available_width, available_height) {
        return ViewportSize::DEGENERATE;
    }
    let width = bounds.clamp_width(available_width as i32);
    let height = bounds.clamp_height(available_height as i32);
    ViewportSize {
        width,
        height,
        scale: reference_scale(f64::from(width), f64::from(height)),
        dpi_scale: sanitize_dpi(dpi_scale),
    }
}

/// Viewport derived from a logical area multiplied by the DPI scale.
pub fn dpi_scaled(
    available_width: f64,
    available_height: f64,
    dpi_scale: f64,
    target_aspect: Option<f64>,
    bounds: &SizeBounds,
) -> ViewportSize {
    if !usable(available_width, available_height) {
        return ViewportSize::DEGENERATE;
    }
    let dpi_scale = sanitize_dpi(dpi_scale);
    let (mut width, mut height) = (available_width * dpi_scale, available_height * dpi_scale);
    let scale = reference_scale(width, height).clamp(DPI_SCALE_RANGE.0, DPI_SCALE_RANGE.1);

    if let Some(aspect) = valid_aspect(target_aspect) {
        (width, height) = fit_aspect(width, height, aspect);
    }

    ViewportSize {
        width: bounds.clamp_width((width * scale) as i32),
        height: bounds.clamp_height((height * scale) as i32),
        scale,
        dpi_scale,
    }
}

/// Letterboxed viewport that never grows past the logical area.
pub fn aspect_constrained(
    available_width: f64,
    available_height: f64,
    dpi_scale: f64,
    preferred_aspect: Option<f64>,
    bounds: &SizeBounds,
) -> ViewportSize {
    if !usable(available_width, available_height) {
        return ViewportSize::DEGENERATE;
    }
    let dpi_scale = sanitize_dpi(dpi_scale);
    let effective_width = available_width * dpi_scale;
    let effective_height = available_height * dpi_scale;
    let scale = reference_scale(effective_width, effective_height)
        .clamp(ASPECT_SCALE_RANGE.0, ASPECT_SCALE_RANGE.1);

    let (mut width, mut height) = (effective_width * scale, effective_height * scale);
    if let Some(aspect) = valid_aspect(preferred_aspect) {
        (width, height) = fit_aspect(width, height, aspect);
    }

    let width = (width as i32).min(available_width as i32);
    let height = (height as i32).min(available_height as i32);

    ViewportSize {
        width: bounds.clamp_width(width),
        height: bounds.clamp_height(height),
        scale,
        dpi_scale,
    }
}

/// Viewport inset by `margin` of each side; `margin` is clamped to `[0, 0.45]`.
pub fn safe_area(
    available_width: f64,
    available_height: f64,
    margin: f64,
    dpi_scale: f64,
    bounds: &SizeBounds,
) -> ViewportSize {
    if !usable(available_width, available_height) {
        return ViewportSize::DEGENERATE;
    }
    let margin = if margin.is_finite() {
        margin.clamp(0.0, MAX_SAFE_MARGIN)
    } else {
        DEFAULT_SAFE_MARGIN
    };
    let keep = 1.0 - 2.0 * margin;

    ViewportSize {
        width: bounds.clamp_width((available_width * keep) as i32),
        height: bounds.clamp_height((available_height * keep) as i32),
        scale: 1.0,
        dpi_scale: sanitize_dpi(dpi_scale),
    }
}

fn usable(width: f64, height: f64) -> bool {
    width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
}

fn sanitize_dpi(dpi_scale: f64) -> f64 {
    if dpi_scale.is_finite() && dpi_scale > 0.0 {
        dpi_scale
    } else {
        1.0
    }
}

fn valid_aspect(aspect: Option<f64>) -> Option<f64> {
    aspect.filter(|a| a.is_finite() && *a > 0.0)
}

fn reference_scale(width: f64, height: f64) -> f64 {
    (width / REFERENCE_WIDTH).min(height / REFERENCE_HEIGHT)
}

/// Shrink one side so `width / height == aspect`.
fn fit_aspect(width: f64, height: f64, aspect: f64) -> (f64, f64) {
    if width / height > aspect {
        (height * aspect, height)
    } else {
        (width, width / aspect)
    }
}
