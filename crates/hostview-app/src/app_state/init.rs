//! Window creation, placeholder setup and renderer launch.

use std::sync::Arc;
use std::time::Duration;

use winit::event_loop::ActiveEventLoop;
use winit::raw_window_handle::{HasWindowHandle, RawWindowHandle};
use winit::window::{Window, WindowAttributes};

use hostview_common::{Event, PixelSize, WindowHandle};
use hostview_embed::{ProcessLauncher, WindowEmbedder};

use super::core::HostviewApp;

impl HostviewApp {
    /// Create the host window.
    /// Returns `false` if creation failed and the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let attrs = WindowAttributes::default()
            .with_title(self.config.layout.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                f64::from(self.config.layout.width),
                f64::from(self.config.layout.height),
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        self.apply_scale_factor(window.scale_factor());
        let size = window.inner_size();
        self.layout.set_window_size(size.width, size.height);

        self.window = Some(window);
        tracing::info!("Host window created");
        true
    }

    /// Feed the window's scale factor to the layout, falling back to the
    /// system DPI when the window reports nothing usable. Returns the
    /// scale in effect.
    pub(super) fn apply_scale_factor(&mut self, reported: f64) -> f64 {
        let scale = if reported.is_finite() && reported > 0.0 {
            reported
        } else {
            let system = self.api.system_dpi_scale();
            tracing::warn!(reported, system, "Window has no usable scale factor; using system DPI");
            system
        };
        self.layout.set_scale_factor(scale);
        self.layout.scale_factor()
    }

    /// Create the placeholder and start the renderer in the background.
    ///
    /// Failures here abort embedding only; the shell keeps running and
    /// shows the reason in its title.
    pub(super) fn start_embedding(&mut self) {
        let Some(host) = self.window.as_deref().and_then(native_handle) else {
            tracing::warn!("Host window has no native handle; renderer will not be embedded");
            self.event_bus
                .publish(Event::LaunchFailed("no native host window".into()));
            return;
        };

        let grace = Duration::from_millis(self.config.renderer.shutdown_grace_ms);
        let fallback = PixelSize::new(
            self.config.viewport.default_width,
            self.config.viewport.default_height,
        );
        match WindowEmbedder::create(self.api.clone(), host, grace) {
            Ok(embedder) => self.embedder = Some(embedder.with_fallback_size(fallback)),
            Err(e) => {
                tracing::error!("{e}");
                self.event_bus.publish(Event::LaunchFailed(e.to_string()));
                return;
            }
        }

        self.start_launch(host);
    }

    fn start_launch(&mut self, host: WindowHandle) {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build();

        let rt = match rt {
            Ok(rt) => rt,
            Err(e) => {
                tracing::warn!("Failed to start tokio runtime for renderer launch: {e}");
                self.event_bus.publish(Event::LaunchFailed(e.to_string()));
                return;
            }
        };

        let launcher = ProcessLauncher::from_config(
            self.api.clone(),
            &self.config.renderer,
            self.working_dir.clone(),
        )
        .with_events(self.event_bus.clone());
        let candidates = self.candidates.clone();
        let cancel = self.cancel.clone();
        let (tx, rx) = std::sync::mpsc::channel();

        rt.spawn(async move {
            let result = launcher.launch(&candidates, host, &cancel).await;
            if tx.send(result).is_err() {
                tracing::debug!("Launch result dropped; host already shut down");
            }
        });

        self.launch_rx = Some(rx);
        self.tokio_runtime = Some(rt);
        tracing::info!(host = %host, "Renderer launch started");
    }
}

/// Native identifier of the host window, where the platform has one.
pub(super) fn native_handle(window: &Window) -> Option<WindowHandle> {
    let handle = window.window_handle().ok()?;
    match handle.as_raw() {
        RawWindowHandle::Win32(h) => Some(WindowHandle(h.hwnd.get() as u64)),
        RawWindowHandle::Xlib(h) => Some(WindowHandle(h.window as u64)),
        RawWindowHandle::Xcb(h) => Some(WindowHandle(u64::from(h.window.get()))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use hostview_config::HostviewConfig;
    use hostview_platform::recording::RecordingWindowApi;

    use crate::app_state::core::{test_app, HostviewApp};

    #[test]
    fn unusable_scale_factor_uses_system_dpi() {
        let api = Arc::new(RecordingWindowApi::new().with_dpi_scale(1.5));
        let mut app = HostviewApp::new(HostviewConfig::default(), api, Vec::new(), std::env::temp_dir());

        assert_eq!(app.apply_scale_factor(f64::NAN), 1.5);
        assert_eq!(app.layout.scale_factor(), 1.5);
        assert_eq!(app.apply_scale_factor(0.0), 1.5);
        assert_eq!(app.apply_scale_factor(2.0), 2.0);
        assert_eq!(app.layout.scale_factor(), 2.0);
    }

    #[test]
    fn start_embedding_without_window_reports_failure() {
        let mut app = test_app();
        app.start_embedding();

        assert!(app.embedder.is_none());
        assert!(app.launch_rx.is_none());
        assert!(app.tokio_runtime.is_none());
        assert!(matches!(
            app.events_rx.try_recv(),
            Ok(hostview_common::Event::LaunchFailed(_))
        ));
    }
}
