//! Measuring the space available to the renderer.
//!
//! Intermediate layout containers may not have committed a size when a
//! signal arrives, so measurement walks a fallback chain from the most
//! specific element outward.

use hostview_common::{LogicalPoint, LogicalSize};

/// Sizes reported by the host's layout tree, in logical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSnapshot {
    /// The renderer's direct container, as laid out.
    pub container: Option<LogicalSize>,
    /// Top-left corner of the container in the window's client area.
    pub container_origin: LogicalPoint,
    /// The panel enclosing the container.
    pub panel: Option<LogicalSize>,
    /// Space inside the panel taken by chrome (headers, status rows, padding).
    pub panel_chrome: LogicalSize,
    /// The size the container asked for, before layout committed.
    pub container_desired: Option<LogicalSize>,
    /// Client area of the top-level window.
    pub window: Option<LogicalSize>,
    pub dpi_scale: f64,
}

impl Default for LayoutSnapshot {
    fn default() -> Self {
        Self {
            container: None,
            container_origin: LogicalPoint::new(0.0, 0.0),
            panel: None,
            panel_chrome: LogicalSize::new(0.0, 0.0),
            container_desired: None,
            window: None,
            dpi_scale: 1.0,
        }
    }
}

/// Where a measurement came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureSource {
    Container,
    Panel,
    ContainerDesired,
    Window,
}

/// Read access to the host layout.
pub trait LayoutSource {
    fn snapshot(&self) -> LayoutSnapshot;
}

impl LayoutSource for LayoutSnapshot {
    fn snapshot(&self) -> LayoutSnapshot {
        *self
    }
}

/// First usable size along container → panel minus chrome → desired
/// container size → window.
pub fn available_size(snapshot: &LayoutSnapshot) -> Option<(LogicalSize, MeasureSource)> {
    let panel_inner = snapshot.panel.map(|panel| {
        LogicalSize::new(
            panel.width - snapshot.panel_chrome.width,
            panel.height - snapshot.panel_chrome.height,
        )
    });

    [
        (snapshot.container, MeasureSource::Container),
        (panel_inner, MeasureSource::Panel),
        (snapshot.container_desired, MeasureSource::ContainerDesired),
        (snapshot.window, MeasureSource::Window),
    ]
    .into_iter()
    .find_map(|(size, source)| size.filter(LogicalSize::is_measured).map(|s| (s, source)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(w: f64, h: f64) -> Option<LogicalSize> {
        Some(LogicalSize::new(w, h))
    }

    #[test]
    fn container_preferred() {
        let snapshot = LayoutSnapshot {
            container: size(900.0, 600.0),
            panel: size(1000.0, 700.0),
            window: size(1280.0, 800.0),
            ..Default::default()
        };
        assert_eq!(
            available_size(&snapshot),
            Some((LogicalSize::new(900.0, 600.0), MeasureSource::Container))
        );
    }

    #[test]
    fn panel_minus_chrome_when_container_unmeasured() {
        let snapshot = LayoutSnapshot {
            container: size(0.0, 0.0),
            panel: size(1000.0, 700.0),
            panel_chrome: LogicalSize::new(16.0, 68.0),
            window: size(1280.0, 800.0),
            ..Default::default()
        };
        assert_eq!(
            available_size(&snapshot),
            Some((LogicalSize::new(984.0, 632.0), MeasureSource::Panel))
        );
    }

    #[test]
    fn chrome_larger_than_panel_skips_panel() {
        let snapshot = LayoutSnapshot {
            panel: size(40.0, 50.0),
            panel_chrome: LogicalSize::new(16.0, 68.0),
            container_desired: size(640.0, 480.0),
            ..Default::default()
        };
        assert_eq!(
            available_size(&snapshot).map(|(_, source)| source),
            Some(MeasureSource::ContainerDesired)
        );
    }

    #[test]
    fn window_is_last_resort() {
        let snapshot = LayoutSnapshot {
            container: size(f64::NAN, 10.0),
            window: size(1280.0, 800.0),
            ..Default::default()
        };
        assert_eq!(
            available_size(&snapshot),
            Some((LogicalSize::new(1280.0, 800.0), MeasureSource::Window))
        );
    }

    #[test]
    fn nothing_measured() {
        assert_eq!(available_size(&LayoutSnapshot::default()), None);
    }
}
