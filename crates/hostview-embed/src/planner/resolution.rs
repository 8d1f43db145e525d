//! Render resolution selection.
//!
//! A fixed catalog of common resolutions is scored against the available
//! area; when nothing in the catalog fits, a custom resolution is derived
//! from the available area instead.

use super::types::{RenderResolution, SizeBounds};

/// A standard resolution with its relative quality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogEntry {
    pub width: i32,
    pub height: i32,
    pub quality: f64,
}

impl CatalogEntry {
    const fn new(width: i32, height: i32, quality: f64) -> Self {
        Self {
            width,
            height,
            quality,
        }
    }

    fn aspect(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    fn area(&self) -> f64 {
        f64::from(self.width) * f64::from(self.height)
    }

    fn fits(&self, available_width: f64, available_height: f64) -> bool {
        f64::from(self.width) <= available_width && f64::from(self.height) <= available_height
    }
}

/// Catalog in priority order; ties keep the earlier entry.
pub const STANDARD_RESOLUTIONS: [CatalogEntry; 6] = [
    CatalogEntry::new(1920, 1080, 1.00),
    CatalogEntry::new(1600, 900, 0.83),
    CatalogEntry::new(1366, 768, 0.71),
    CatalogEntry::new(1280, 720, 0.67),
    CatalogEntry::new(1024, 768, 0.53),
    CatalogEntry::new(800, 600, 0.42),
];

pub const QUALITY_WEIGHT: f64 = 0.5;
pub const ASPECT_WEIGHT: f64 = 0.3;
pub const SPACE_WEIGHT: f64 = 0.2;

/// Custom resolutions are re-shaped when their aspect ratio drifts further
/// than this from the available area.
const ASPECT_TOLERANCE: f64 = 0.1;

/// Weighted score of a catalog entry for the given available area.
pub fn score_entry(entry: &CatalogEntry, available_width: f64, available_height: f64) -> f64 {
    let available_aspect = available_width / available_height;
    let aspect_match = 1.0 - (entry.aspect() - available_aspect).abs();
    let space_usage = entry.area() / (available_width * available_height);

    entry.quality * QUALITY_WEIGHT + aspect_match * ASPECT_WEIGHT + space_usage * SPACE_WEIGHT
}

/// Choose the render resolution for an available area.
///
/// Non-positive or non-finite input yields [`RenderResolution::DEGENERATE`].
/// The result always lies within `bounds`.
pub fn plan_resolution(
    available_width: f64,
    available_height: f64,
    bounds: &SizeBounds,
) -> RenderResolution {
    if !is_usable(available_width) || !is_usable(available_height) {
        return RenderResolution::DEGENERATE;
    }

    let mut best: Option<(&CatalogEntry, f64)> = None;
    for entry in STANDARD_RESOLUTIONS
        .iter()
        .filter(|e| e.fits(available_width, available_height))
        .filter(|e| bounds.contains(e.width, e.height))
    {
        let score = score_entry(entry, available_width, available_height);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((entry, score)),
        }
    }

    match best {
        Some((entry, _)) => RenderResolution {
            width: entry.width,
            height: entry.height,
            quality: entry.quality,
        },
        None => custom_resolution(available_width, available_height, bounds),
    }
}

/// Derive a resolution from the available area when no catalog entry fits.
pub fn custom_resolution(
    available_width: f64,
    available_height: f64,
    bounds: &SizeBounds,
) -> RenderResolution {
    let available_aspect = available_width / available_height;

    let mut width = bounds.clamp_width(available_width as i32);
    let mut height = bounds.clamp_height(available_height as i32);

    let custom_aspect = f64::from(width) / f64::from(height);
    if (custom_aspect - available_aspect).abs() > ASPECT_TOLERANCE {
        if custom_aspect > available_aspect {
            width = (f64::from(height) * available_aspect) as i32;
        } else {
            height = (f64::from(width) / available_aspect) as i32;
        }
        width = bounds.clamp_width(width);
        height = bounds.clamp_height(height);
    }

    let span = bounds.max_area() - bounds.min_area();
    let quality = if span > 0.0 {
        ((f64::from(width) * f64::from(height) - bounds.min_area()) / span).clamp(0.0, 1.0)
    } else {
        1.0
    };

    RenderResolution {
        width,
        height,
        quality,
    }
}

fn is_usable(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
