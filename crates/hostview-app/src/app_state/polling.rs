//! Launch results, status events and debounced resize polling.

use std::sync::mpsc::TryRecvError;
use std::time::{Duration, Instant};

use tokio::sync::broadcast::error::TryRecvError as BusTryRecvError;
use winit::event_loop::{ActiveEventLoop, ControlFlow};

use hostview_common::{EmbedError, Event};

use super::core::HostviewApp;

/// Idle wake-up interval while a launch is pending or a renderer runs.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How often to check whether the renderer exited on its own.
const EXIT_CHECK_INTERVAL: Duration = Duration::from_millis(500);

impl HostviewApp {
    /// Run polling and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        self.poll_launch();
        self.poll_sync(now);
        self.poll_renderer_exit(now);
        if self.poll_events() {
            self.update_window_title();
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_wake(now)));
    }

    /// Earliest of the debounce deadline and the idle interval.
    pub(super) fn next_wake(&self, now: Instant) -> Instant {
        let idle = now + POLL_INTERVAL;
        match self.sync.next_deadline() {
            Some(deadline) => deadline.min(idle),
            None => idle,
        }
    }

    fn poll_launch(&mut self) {
        let Some(rx) = &self.launch_rx else {
            return;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                self.launch_rx = None;
                return;
            }
        };
        self.launch_rx = None;

        let process = match result {
            Ok(process) => process,
            Err(EmbedError::LaunchCancelled) => {
                tracing::debug!("Renderer launch cancelled");
                return;
            }
            Err(e) => {
                tracing::error!("Renderer launch failed: {e}");
                return;
            }
        };

        let Some(embedder) = self.embedder.as_mut() else {
            return;
        };
        let window = process.window();
        match embedder.embed(process) {
            Ok(()) => {
                if let Some(window) = window {
                    self.event_bus
                        .publish(Event::RendererEmbedded(window));
                }
            }
            Err(e) => {
                tracing::error!("Failed to embed renderer window: {e}");
                self.event_bus.publish(Event::LaunchFailed(e.to_string()));
            }
        }
        self.sync.recompute(&self.layout, embedder);
    }

    fn poll_sync(&mut self, now: Instant) {
        if let Some(embedder) = self.embedder.as_mut() {
            self.sync.poll(now, &self.layout, embedder);
        }
    }

    fn poll_renderer_exit(&mut self, now: Instant) {
        if now.duration_since(self.last_exit_check) < EXIT_CHECK_INTERVAL {
            return;
        }
        self.last_exit_check = now;
        if let Some(embedder) = self.embedder.as_mut() {
            if embedder.check_renderer_exit() {
                self.event_bus.publish(Event::RendererExited);
            }
        }
    }

    /// Drain status events. Returns `true` if the status text changed.
    pub(super) fn poll_events(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.events_rx.try_recv() {
                Ok(event) => {
                    if let Some(status) = status_text(&event) {
                        if status != self.status {
                            self.status = status;
                            changed = true;
                        }
                    }
                }
                Err(BusTryRecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Status events lagged");
                }
                Err(BusTryRecvError::Empty | BusTryRecvError::Closed) => break,
            }
        }
        changed
    }
}

/// Short status line for an event, if it changes what the user sees.
pub(super) fn status_text(event: &Event) -> Option<String> {
    match event {
        Event::RendererLaunched { pid } => Some(format!("renderer started (pid {pid})")),
        Event::RendererEmbedded(_) => Some("renderer embedded".into()),
        Event::DiscoveryTimedOut { .. } => Some("waiting for renderer window".into()),
        Event::LaunchFailed(reason) => Some(format!(
            "renderer unavailable: {}",
            reason.lines().next().unwrap_or_default()
        )),
        Event::ViewportResized { viewport, render } => Some(format!("{viewport} @ {render}")),
        Event::RendererExited => Some("renderer exited".into()),
        Event::Shutdown => Some("shutting down".into()),
        Event::Unknown => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::core::test_app;
    use hostview_common::{PixelSize, WindowHandle};

    #[test]
    fn status_for_lifecycle_events() {
        assert_eq!(
            status_text(&Event::RendererLaunched { pid: 42 }).as_deref(),
            Some("renderer started (pid 42)")
        );
        assert_eq!(
            status_text(&Event::RendererEmbedded(WindowHandle(1))).as_deref(),
            Some("renderer embedded")
        );
        assert_eq!(
            status_text(&Event::ViewportResized {
                viewport: PixelSize::new(1500, 949),
                render: PixelSize::new(1366, 768),
            })
            .as_deref(),
            Some("1500x949 @ 1366x768")
        );
        assert_eq!(status_text(&Event::Unknown), None);
    }

    #[test]
    fn launch_failure_shows_first_line() {
        let status = status_text(&Event::LaunchFailed(
            "renderer executable not found, searched:\n/a\n/b".into(),
        ));
        assert_eq!(
            status.as_deref(),
            Some("renderer unavailable: renderer executable not found, searched:")
        );
    }

    #[test]
    fn poll_events_tracks_latest_status() {
        let mut app = test_app();
        app.event_bus.publish(Event::RendererLaunched { pid: 1 });
        app.event_bus.publish(Event::RendererExited);

        assert!(app.poll_events());
        assert_eq!(app.status, "renderer exited");
        assert!(!app.poll_events());
    }

    #[test]
    fn idle_wake_without_pending_resize() {
        let app = test_app();
        let now = Instant::now();
        assert_eq!(app.next_wake(now), now + POLL_INTERVAL);
    }

    #[test]
    fn pending_resize_wakes_earlier() {
        let mut app = test_app();
        let now = Instant::now();
        app.sync.signal(hostview_embed::HostSignal::LayoutChanged, now);
        assert_eq!(app.next_wake(now), now + Duration::from_millis(40));
    }
}
