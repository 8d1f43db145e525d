//! Host editor window layout.

use serde::{Deserialize, Serialize};

/// Geometry of the editor shell surrounding the viewport, in logical units.
///
/// The viewport panel sits to the right of the parameter side panel and
/// carries a group header above and a status row below the renderer surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub side_panel_width: u32,
    pub group_header_height: u32,
    pub status_row_height: u32,
    pub panel_padding: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            title: "Hostview".into(),
            width: 1280,
            height: 800,
            side_panel_width: 320,
            group_header_height: 24,
            status_row_height: 28,
            panel_padding: 8,
        }
    }
}
