//! `ApplicationHandler` implementation for the winit event loop.

use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use hostview_common::HostWindowState;
use hostview_embed::HostSignal;

use super::core::HostviewApp;

impl ApplicationHandler for HostviewApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if !self.initialize_window(event_loop) {
            event_loop.exit();
            return;
        }

        self.start_embedding();
        self.sync.signal(HostSignal::LayoutChanged, Instant::now());
        self.update_window_title();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let now = Instant::now();
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                self.shutdown();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                let state = if size.width == 0 || size.height == 0 {
                    HostWindowState::Minimized
                } else {
                    self.window
                        .as_deref()
                        .map(window_state)
                        .unwrap_or_default()
                };
                self.on_window_state(state, now);
                if !state.is_minimized() {
                    self.layout.set_window_size(size.width, size.height);
                    self.sync.signal(HostSignal::LayoutChanged, now);
                }
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                let scale = self.apply_scale_factor(scale_factor);
                self.sync.signal(HostSignal::DpiChanged(scale), now);
            }

            WindowEvent::Occluded(occluded) => {
                let state = match (occluded, self.window.as_deref()) {
                    (true, Some(window)) if window.is_minimized() == Some(true) => {
                        HostWindowState::Minimized
                    }
                    (false, Some(window)) => window_state(window),
                    _ => return,
                };
                self.on_window_state(state, now);
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.should_exit {
            event_loop.exit();
            return;
        }
        self.poll_and_schedule(event_loop);
    }
}

impl HostviewApp {
    /// Forward a window state transition, ignoring repeats.
    pub(super) fn on_window_state(&mut self, state: HostWindowState, now: Instant) {
        if self.sync.host_state() != state {
            tracing::debug!(?state, "Host window state changed");
            self.sync.signal(HostSignal::WindowStateChanged(state), now);
        }
    }
}

fn window_state(window: &Window) -> HostWindowState {
    if window.is_minimized() == Some(true) {
        HostWindowState::Minimized
    } else if window.is_maximized() {
        HostWindowState::Maximized
    } else {
        HostWindowState::Normal
    }
}
