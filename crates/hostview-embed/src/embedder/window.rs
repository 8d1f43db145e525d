use std::sync::Arc;
use std::time::Duration;

use hostview_common::{EmbedError, HostWindowState, PixelPoint, PixelSize, WindowHandle};
use hostview_platform::style::embedded_child_style;
use hostview_platform::{NativeWindowApi, WindowMessage, WindowSignature};

use crate::launcher::{EmbeddedProcess, ProcessState};

/// Initial extent of the placeholder before the first layout pass.
pub const PLACEHOLDER_SIZE: PixelSize = PixelSize::new(100, 100);

/// Default for the first resize when the placeholder has no client area
/// yet; see [`WindowEmbedder::with_fallback_size`].
pub const FALLBACK_SIZE: PixelSize = PixelSize::new(800, 600);

/// Owns the placeholder child window and the renderer's association with it.
///
/// All geometry changes to the placeholder/renderer pair go through here.
pub struct WindowEmbedder {
    pub(super) api: Arc<dyn NativeWindowApi>,
    parent: WindowHandle,
    pub(super) placeholder: Option<WindowHandle>,
    pub(super) process: Option<EmbeddedProcess>,
    host_state: HostWindowState,
    /// Placeholder position in the parent's client area.
    origin: PixelPoint,
    fallback_size: PixelSize,
    pub(super) shutdown_grace: Duration,
}

impl WindowEmbedder {
    /// Create the placeholder under the host window.
    pub fn create(
        api: Arc<dyn NativeWindowApi>,
        parent: WindowHandle,
        shutdown_grace: Duration,
    ) -> Result<Self, EmbedError> {
        let placeholder = api
            .create_child(parent, PLACEHOLDER_SIZE)
            .map_err(EmbedError::HostWindowCreationFailed)?;
        tracing::debug!(parent = %parent, placeholder = %placeholder, "Created placeholder window");

        Ok(Self {
            api,
            parent,
            placeholder: Some(placeholder),
            process: None,
            host_state: HostWindowState::Normal,
            origin: PixelPoint::ORIGIN,
            fallback_size: FALLBACK_SIZE,
            shutdown_grace,
        })
    }

    /// Size applied on embed when the placeholder reports no client area.
    /// Non-positive sizes are ignored.
    pub fn with_fallback_size(mut self, size: PixelSize) -> Self {
        if size.is_positive() {
            self.fallback_size = size;
        }
        self
    }

    pub fn parent(&self) -> WindowHandle {
        self.parent
    }

    /// `None` once destroyed.
    pub fn placeholder(&self) -> Option<WindowHandle> {
        self.placeholder
    }

    pub fn process(&self) -> Option<&EmbeddedProcess> {
        self.process.as_ref()
    }

    pub fn renderer_window(&self) -> Option<WindowHandle> {
        self.process.as_ref().and_then(EmbeddedProcess::window)
    }

    pub fn host_state(&self) -> HostWindowState {
        self.host_state
    }

    pub fn origin(&self) -> PixelPoint {
        self.origin
    }

    pub fn set_host_state(&mut self, state: HostWindowState) {
        self.host_state = state;
    }

    /// Take ownership of a launched renderer and, if its window is known,
    /// reparent it under the placeholder.
    ///
    /// A process without a window is kept so a later lookup can finish
    /// the job through [`attach_window`](Self::attach_window). A renderer
    /// that was already embedded is terminated first.
    pub fn embed(&mut self, process: EmbeddedProcess) -> Result<(), EmbedError> {
        let window = process.window();
        if let Some(previous) = self.process.replace(process) {
            tracing::warn!(pid = previous.pid(), "Replacing an already embedded renderer");
            self.terminate(previous);
        }
        match window {
            Some(window) => self.bind(window),
            None => Ok(()),
        }
    }

    /// Associate a window discovered after launch. Returns `Ok(false)` if
    /// there is no process, it already has a window, or it has exited.
    pub fn attach_window(&mut self, window: WindowHandle) -> Result<bool, EmbedError> {
        let attached = match self.process.as_mut() {
            Some(process) => process.attach_window(window),
            None => false,
        };
        if attached {
            self.bind(window)?;
        }
        Ok(attached)
    }

    /// One non-blocking lookup for a renderer still waiting for its
    /// window; embeds it if found.
    pub fn retry_discovery(&mut self, signature: &WindowSignature) -> Result<Option<WindowHandle>, EmbedError> {
        if !self.needs_window() {
            return Ok(None);
        }
        let Some(window) = self.api.find_window(signature) else {
            return Ok(None);
        };
        if self.attach_window(window)? {
            Ok(Some(window))
        } else {
            Ok(None)
        }
    }

    fn bind(&mut self, window: WindowHandle) -> Result<(), EmbedError> {
        let Some(placeholder) = self.placeholder else {
            return Ok(());
        };

        self.api.set_parent(window, placeholder)?;
        let style = self.api.window_style(window)?;
        self.api.set_window_style(window, embedded_child_style(style))?;
        tracing::info!(window = %window, placeholder = %placeholder, "Renderer window embedded");

        let initial = match self.api.client_size(placeholder) {
            Ok(size) if size.is_positive() => size,
            Ok(_) => self.fallback_size,
            Err(e) => {
                tracing::warn!(error = %e, "Placeholder client size unavailable");
                self.fallback_size
            }
        };
        self.update_size(initial.width, initial.height)
    }

    /// Move the placeholder to `origin`, then size it and the renderer.
    ///
    /// The origin is remembered even when the resize itself is skipped.
    pub fn update_bounds(&mut self, origin: PixelPoint, width: i32, height: i32) -> Result<(), EmbedError> {
        self.origin = origin;
        self.update_size(width, height)
    }

    /// Resize the placeholder and renderer, then notify the renderer.
    ///
    /// The placeholder is also put back at the current origin. No-op when
    /// either dimension is not positive, while the host is minimized, or
    /// after teardown.
    pub fn update_size(&self, width: i32, height: i32) -> Result<(), EmbedError> {
        let size = PixelSize::new(width, height);
        if !size.is_positive() || self.host_state.is_minimized() {
            return Ok(());
        }
        let Some(placeholder) = self.placeholder else {
            return Ok(());
        };

        self.api.set_window_rect(placeholder, self.origin, size)?;
        if let Some(window) = self.renderer_window() {
            self.api.set_window_size(window, size)?;
            self.api
                .post_message(window, WindowMessage::SizeChanged(size))?;
        }
        tracing::debug!(width, height, origin = %self.origin, "Applied viewport bounds");
        Ok(())
    }

    /// Check whether the renderer is gone; clears the window association
    /// if so. Returns `true` only on the transition to exited.
    ///
    /// A live renderer whose window was destroyed goes back to waiting for
    /// a window, so discovery can pick up a replacement.
    pub fn check_renderer_exit(&mut self) -> bool {
        let Some(process) = self.process.as_mut() else {
            return false;
        };
        if process.state() == ProcessState::Exited {
            return false;
        }
        if process.poll_exit() {
            tracing::warn!(pid = process.pid(), "Renderer process exited");
            return true;
        }
        if let Some(window) = process.window() {
            if !self.api.is_window(window) {
                tracing::warn!(pid = process.pid(), window = %window, "Renderer window closed");
                process.detach_window();
            }
        }
        false
    }

    /// Waiting for its window, still running.
    pub fn needs_window(&self) -> bool {
        self.process
            .as_ref()
            .is_some_and(|p| p.state() == ProcessState::RunningNoWindow)
    }
}

impl Drop for WindowEmbedder {
    fn drop(&mut self) {
        self.destroy();
    }
}
