//! Native window capability interface.
//!
//! The embedding core only ever talks to windows through
//! [`NativeWindowApi`]: create/destroy a placeholder, look a window up by
//! signature, reparent it, restyle it, move or resize it and post
//! messages to it.
//! Each windowing back end provides one adapter.

use hostview_common::{PixelPoint, PixelSize, PlatformError, WindowHandle};
use serde::{Deserialize, Serialize};

pub mod message;
pub mod noop;
pub mod recording;
pub mod style;
#[cfg(target_os = "windows")]
pub mod win32;

pub use message::WindowMessage;

pub type Result<T> = std::result::Result<T, PlatformError>;

/// DPI that corresponds to a scale factor of 1.0.
pub const BASE_DPI: f64 = 96.0;

/// `(class name, title)` pair identifying the renderer's top-level window.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowSignature {
    pub class_name: String,
    pub title: String,
}

impl WindowSignature {
    pub fn new(class_name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            title: title.into(),
        }
    }
}

/// Platform-agnostic operations on native windows.
///
/// Implementations must be callable from a background task (window
/// discovery runs off the UI thread), hence `Send + Sync`.
pub trait NativeWindowApi: Send + Sync {
    /// Create a borderless, clipping child window under `parent`.
    fn create_child(&self, parent: WindowHandle, size: PixelSize) -> Result<WindowHandle>;
    fn destroy_window(&self, window: WindowHandle) -> Result<()>;
    /// Look up a top-level window by signature without blocking.
    fn find_window(&self, signature: &WindowSignature) -> Option<WindowHandle>;
    /// Whether `window` still names a live window.
    fn is_window(&self, window: WindowHandle) -> bool;
    fn set_parent(&self, child: WindowHandle, parent: WindowHandle) -> Result<()>;
    fn window_style(&self, window: WindowHandle) -> Result<u32>;
    fn set_window_style(&self, window: WindowHandle, style: u32) -> Result<()>;
    fn client_size(&self, window: WindowHandle) -> Result<PixelSize>;
    /// Resize without moving, re-ordering or activating.
    fn set_window_size(&self, window: WindowHandle, size: PixelSize) -> Result<()>;
    /// Move to `origin` in the parent's client area and resize in one step.
    fn set_window_rect(&self, window: WindowHandle, origin: PixelPoint, size: PixelSize) -> Result<()>;
    fn post_message(&self, window: WindowHandle, message: WindowMessage) -> Result<()>;

    /// System DPI relative to 96 DPI. Hosts fall back to this when their
    /// toolkit reports no usable scale factor.
    fn system_dpi_scale(&self) -> f64 {
        1.0
    }
}

/// Create the platform-appropriate window API.
///
/// On Windows: returns the Win32 adapter.
/// On other platforms: returns a no-op implementation that refuses to
/// create windows, so embedding aborts cleanly.
pub fn create_window_api() -> std::sync::Arc<dyn NativeWindowApi> {
    #[cfg(target_os = "windows")]
    {
        std::sync::Arc::new(win32::Win32WindowApi::new())
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::sync::Arc::new(noop::NoopWindowApi)
    }
}
