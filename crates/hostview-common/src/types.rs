use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a native window (an `HWND` on Windows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowHandle(pub u64);

impl WindowHandle {
    /// Signed integer form used on the renderer command line.
    pub fn as_i64(self) -> i64 {
        self.0 as i64
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Size in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: i32,
    pub height: i32,
}

impl PixelSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Both dimensions are strictly positive.
    pub fn is_positive(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl fmt::Display for PixelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Position in physical pixels, relative to the parent window's client area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const ORIGIN: Self = Self::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for PixelPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Position in host layout units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LogicalPoint {
    pub x: f64,
    pub y: f64,
}

impl LogicalPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert to physical pixels. Non-finite coordinates map to zero.
    pub fn to_physical(self, scale_factor: f64) -> PixelPoint {
        let axis = |v: f64| {
            let scaled = v * scale_factor;
            if scaled.is_finite() {
                scaled as i32
            } else {
                0
            }
        };
        PixelPoint::new(axis(self.x), axis(self.y))
    }
}

/// Size in host layout units (device independent).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogicalSize {
    pub width: f64,
    pub height: f64,
}

impl LogicalSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A measured size is usable only when both sides are finite and non-zero.
    pub fn is_measured(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Convert to physical pixels, truncating toward zero.
    pub fn to_physical(self, scale_factor: f64) -> PixelSize {
        PixelSize {
            width: (self.width * scale_factor) as i32,
            height: (self.height * scale_factor) as i32,
        }
    }
}

/// Presentation state of the top-level host window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HostWindowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

impl HostWindowState {
    pub fn is_minimized(self) -> bool {
        matches!(self, Self::Minimized)
    }
}
