//! Fixed editor layout used to measure the viewport container.
//!
//! The window is split into a parameter side panel on the left and a
//! viewport panel on the right. The viewport panel has a group header
//! above and a status row below the renderer surface.

use hostview_common::{LogicalPoint, LogicalSize};
use hostview_config::schema::LayoutConfig;
use hostview_embed::sync::{LayoutSource, LayoutSnapshot};

#[derive(Debug, Clone)]
pub(super) struct EditorLayout {
    side_panel_width: f64,
    chrome: LogicalSize,
    /// Container corner: right of the side panel, under the group header.
    container_origin: LogicalPoint,
    window: Option<LogicalSize>,
    scale_factor: f64,
}

impl EditorLayout {
    pub(super) fn from_config(config: &LayoutConfig) -> Self {
        let padding = f64::from(config.panel_padding);
        let header = f64::from(config.group_header_height);
        let side_panel_width = f64::from(config.side_panel_width);
        Self {
            side_panel_width,
            chrome: LogicalSize::new(
                padding * 2.0,
                header + f64::from(config.status_row_height) + padding * 2.0,
            ),
            container_origin: LogicalPoint::new(side_panel_width + padding, header + padding),
            window: None,
            scale_factor: 1.0,
        }
    }

    /// Record the window's inner size in physical pixels.
    pub(super) fn set_window_size(&mut self, width: u32, height: u32) {
        self.window = Some(LogicalSize::new(
            f64::from(width) / self.scale_factor,
            f64::from(height) / self.scale_factor,
        ));
    }

    pub(super) fn set_scale_factor(&mut self, scale_factor: f64) {
        if scale_factor.is_finite() && scale_factor > 0.0 {
            if let Some(window) = self.window {
                let physical = window.to_physical(self.scale_factor);
                self.scale_factor = scale_factor;
                self.set_window_size(physical.width.max(0) as u32, physical.height.max(0) as u32);
            } else {
                self.scale_factor = scale_factor;
            }
        }
    }

    pub(super) fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    fn panel(&self) -> Option<LogicalSize> {
        self.window
            .map(|w| LogicalSize::new(w.width - self.side_panel_width, w.height))
    }

    fn container(&self) -> Option<LogicalSize> {
        self.panel().map(|p| {
            LogicalSize::new(p.width - self.chrome.width, p.height - self.chrome.height)
        })
    }
}

impl LayoutSource for EditorLayout {
    fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            container: self.container(),
            container_origin: self.container_origin,
            panel: self.panel(),
            panel_chrome: self.chrome,
            container_desired: None,
            window: self.window,
            dpi_scale: self.scale_factor,
        }
    }
}
