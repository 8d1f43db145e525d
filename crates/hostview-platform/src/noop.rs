//! No-op window API.
//!
//! Used on platforms where native embedding is not implemented. Window
//! creation reports `NotSupported`; every other mutation succeeds silently
//! and lookups find nothing.

use hostview_common::{PixelPoint, PixelSize, PlatformError, WindowHandle};

use super::{NativeWindowApi, Result, WindowMessage, WindowSignature};

pub struct NoopWindowApi;

impl NativeWindowApi for NoopWindowApi {
    fn create_child(&self, parent: WindowHandle, _size: PixelSize) -> Result<WindowHandle> {
        let os = std::env::consts::OS;
        tracing::warn!(parent = %parent, os, "No native window back end; placeholder not created");
        Err(PlatformError::NotSupported(format!("native window embedding on {os}")))
    }

    fn destroy_window(&self, _window: WindowHandle) -> Result<()> {
        Ok(())
    }

    fn find_window(&self, _signature: &WindowSignature) -> Option<WindowHandle> {
        None
    }

    fn is_window(&self, _window: WindowHandle) -> bool {
        false
    }

    fn set_parent(&self, _child: WindowHandle, _parent: WindowHandle) -> Result<()> {
        Ok(())
    }

    fn window_style(&self, _window: WindowHandle) -> Result<u32> {
        Ok(0)
    }

    fn set_window_style(&self, _window: WindowHandle, _style: u32) -> Result<()> {
        Ok(())
    }

    fn client_size(&self, _window: WindowHandle) -> Result<PixelSize> {
        Ok(PixelSize::new(0, 0))
    }

    fn set_window_size(&self, _window: WindowHandle, _size: PixelSize) -> Result<()> {
        Ok(())
    }

    fn set_window_rect(&self, _window: WindowHandle, _origin: PixelPoint, _size: PixelSize) -> Result<()> {
        Ok(())
    }

    fn post_message(&self, _window: WindowHandle, _message: WindowMessage) -> Result<()> {
        Ok(())
    }
}
