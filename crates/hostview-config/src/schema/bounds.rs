//! Size bounds for the internal render resolution and the on-screen viewport.

use serde::{Deserialize, Serialize};

/// Inclusive bounds for the renderer's internal backbuffer resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionConfig {
    pub min_width: i32,
    pub min_height: i32,
    pub max_width: i32,
    pub max_height: i32,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            min_width: 800,
            min_height: 600,
            max_width: 1920,
            max_height: 1080,
        }
    }
}

/// Bounds for the on-screen viewport, plus the size used before layout settles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub min_width: i32,
    pub min_height: i32,
    pub max_width: i32,
    pub max_height: i32,
    pub default_width: i32,
    pub default_height: i32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_width: 320,
            min_height: 240,
            max_width: 7680,
            max_height: 4320,
            default_width: 800,
            default_height: 600,
        }
    }
}
