//! Debounced host signals in, placeholder/renderer geometry out.
//!
//! The synchronizer owns no windows. Each settled change is measured
//! through a [`LayoutSource`], planned, and handed to the
//! [`WindowEmbedder`](crate::embedder::WindowEmbedder).

use std::time::Instant;

use hostview_common::{Event, EventBus, HostWindowState, PixelPoint, PixelSize};
use hostview_config::HostviewConfig;
use hostview_platform::WindowSignature;

use super::debounce::{DebounceWindows, Debouncer, HostSignal};
use super::measure::{available_size, LayoutSource, MeasureSource};
use crate::embedder::WindowEmbedder;
use crate::planner::{Plan, ResolutionPlanner};

/// Result of one settled recomputation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recomputation {
    /// Measured available area in physical pixels.
    pub available: PixelSize,
    /// Where the placeholder was put, in physical pixels.
    pub origin: PixelPoint,
    pub source: MeasureSource,
    pub plan: Plan,
}

/// Turns bursts of host signals into single, settled geometry updates.
pub struct ResizeSynchronizer {
    planner: ResolutionPlanner,
    debouncer: Debouncer,
    host_state: HostWindowState,
    discovery: Option<WindowSignature>,
    events: Option<EventBus>,
    torn_down: bool,
    last: Option<Recomputation>,
}

impl ResizeSynchronizer {
    pub fn new(planner: ResolutionPlanner, windows: DebounceWindows) -> Self {
        Self {
            planner,
            debouncer: Debouncer::new(windows),
            host_state: HostWindowState::Normal,
            discovery: None,
            events: None,
            torn_down: false,
            last: None,
        }
    }

    pub fn from_config(config: &HostviewConfig) -> Self {
        let sync = Self::new(
            ResolutionPlanner::from_config(config),
            DebounceWindows::from_config(&config.resize),
        );
        if config.renderer.retry_discovery {
            sync.with_discovery_retry(WindowSignature::new(
                &config.renderer.window_class,
                &config.renderer.window_title,
            ))
        } else {
            sync
        }
    }

    /// Look for a missing renderer window on every settled recomputation.
    pub fn with_discovery_retry(mut self, signature: WindowSignature) -> Self {
        self.discovery = Some(signature);
        self
    }

    pub fn with_events(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn host_state(&self) -> HostWindowState {
        self.host_state
    }

    pub fn last(&self) -> Option<&Recomputation> {
        self.last.as_ref()
    }

    /// Record a host signal and schedule a recomputation.
    ///
    /// Minimizing drops any pending recomputation; restoring from
    /// minimized schedules one.
    pub fn signal(&mut self, signal: HostSignal, now: Instant) {
        if self.torn_down {
            return;
        }
        match signal {
            HostSignal::WindowStateChanged(state) => {
                let previous = std::mem::replace(&mut self.host_state, state);
                if state.is_minimized() {
                    tracing::debug!("Host minimized; suspending geometry updates");
                    self.debouncer.cancel();
                    return;
                }
                if previous.is_minimized() {
                    tracing::debug!(?state, "Host restored");
                }
            }
            HostSignal::DpiChanged(scale) => tracing::debug!(scale, "DPI changed"),
            HostSignal::LayoutChanged => {
                if self.host_state.is_minimized() {
                    return;
                }
            }
        }
        self.debouncer.schedule(&signal, now);
    }

    /// When the host loop should next call [`poll`](Self::poll).
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.torn_down {
            None
        } else {
            self.debouncer.next_deadline()
        }
    }

    /// Run the pending recomputation if its deadline has passed.
    pub fn poll(
        &mut self,
        now: Instant,
        layout: &dyn LayoutSource,
        embedder: &mut WindowEmbedder,
    ) -> Option<Recomputation> {
        if self.torn_down {
            return None;
        }
        embedder.set_host_state(self.host_state);
        if !self.debouncer.poll(now) || self.host_state.is_minimized() {
            return None;
        }
        self.recompute(layout, embedder)
    }

    /// Measure, plan and apply immediately.
    pub fn recompute(
        &mut self,
        layout: &dyn LayoutSource,
        embedder: &mut WindowEmbedder,
    ) -> Option<Recomputation> {
        if self.torn_down || self.host_state.is_minimized() {
            return None;
        }
        embedder.set_host_state(self.host_state);

        if embedder.check_renderer_exit() {
            self.publish(Event::RendererExited);
        }
        if let Some(signature) = &self.discovery {
            match embedder.retry_discovery(signature) {
                Ok(Some(window)) => {
                    tracing::info!(window = %window, "Renderer window found on retry");
                    self.publish(Event::RendererEmbedded(window));
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(error = %e, "Failed to embed late renderer window"),
            }
        }

        let snapshot = layout.snapshot();
        let Some((logical, source)) = available_size(&snapshot) else {
            tracing::debug!("No measurable layout element; skipping recomputation");
            return None;
        };

        let available = logical.to_physical(snapshot.dpi_scale);
        let origin = snapshot.container_origin.to_physical(snapshot.dpi_scale);
        let plan = self.planner.plan(available, snapshot.dpi_scale);

        if let Err(e) = embedder.update_bounds(origin, plan.viewport.width, plan.viewport.height) {
            tracing::warn!(error = %e, "Viewport update failed; will retry on next layout change");
        }
        tracing::info!(
            available = %available,
            origin = %origin,
            ?source,
            "{} / {}",
            plan.viewport,
            plan.render
        );
        self.publish(Event::ViewportResized {
            viewport: plan.viewport.pixels(),
            render: plan.render.pixels(),
        });

        let recomputation = Recomputation {
            available,
            origin,
            source,
            plan,
        };
        self.last = Some(recomputation);
        Some(recomputation)
    }

    /// Drop pending work and ignore every later signal.
    pub fn cancel(&mut self) {
        self.debouncer.cancel();
        self.torn_down = true;
    }

    fn publish(&self, event: Event) {
        if let Some(bus) = &self.events {
            bus.publish(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launcher::{EmbeddedProcess, ScriptedProcess};
    use hostview_common::{LogicalPoint, LogicalSize, WindowHandle};
    use hostview_platform::recording::{NativeCall, RecordingWindowApi};
    use hostview_platform::WindowMessage;
    use std::cell::Cell;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::sync::LayoutSnapshot;

    const HOST: WindowHandle = WindowHandle(0x10);
    const RENDERER: WindowHandle = WindowHandle(0x50);

    struct ResizingLayout {
        size: Cell<LogicalSize>,
        reads: Cell<u32>,
    }

    impl ResizingLayout {
        fn new(width: f64, height: f64) -> Self {
            Self {
                size: Cell::new(LogicalSize::new(width, height)),
                reads: Cell::new(0),
            }
        }

        fn resize(&self, width: f64, height: f64) {
            self.size.set(LogicalSize::new(width, height));
        }
    }

    impl LayoutSource for ResizingLayout {
        fn snapshot(&self) -> LayoutSnapshot {
            self.reads.set(self.reads.get() + 1);
            LayoutSnapshot {
                container: Some(self.size.get()),
                ..Default::default()
            }
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn embedded(api: &Arc<RecordingWindowApi>) -> WindowEmbedder {
        let mut embedder = WindowEmbedder::create(api.clone(), HOST, Duration::ZERO).unwrap();
        let mut process = EmbeddedProcess::new(Box::new(ScriptedProcess::running(1)), PathBuf::from("r.exe"));
        process.attach_window(RENDERER);
        embedder.embed(process).unwrap();
        api.clear_calls();
        embedder
    }

    fn posted_sizes(api: &RecordingWindowApi) -> Vec<PixelSize> {
        api.calls()
            .into_iter()
            .filter_map(|call| match call {
                NativeCall::Post {
                    message: WindowMessage::SizeChanged(size),
                    ..
                } => Some(size),
                _ => None,
            })
            .collect()
    }

    fn sync() -> ResizeSynchronizer {
        ResizeSynchronizer::new(ResolutionPlanner::default(), DebounceWindows::default())
    }

    #[test]
    fn burst_produces_one_recomputation_with_last_size() {
        let api = Arc::new(RecordingWindowApi::new().with_renderer_window(RENDERER, 0, 0));
        let mut embedder = embedded(&api);
        let layout = ResizingLayout::new(800.0, 600.0);
        let mut sync = sync();
        let t0 = Instant::now();

        for i in 0..20u32 {
            layout.resize(800.0 + f64::from(i) * 10.0, 600.0 + f64::from(i) * 5.0);
            let now = t0 + ms(u64::from(i) * 5);
            sync.signal(HostSignal::LayoutChanged, now);
            assert!(sync.poll(now, &layout, &mut embedder).is_none());
        }

        let settled = t0 + ms(19 * 5 + 40);
        let result = sync.poll(settled, &layout, &mut embedder).unwrap();
        assert!(sync.poll(settled + ms(500), &layout, &mut embedder).is_none());

        assert_eq!(layout.reads.get(), 1);
        assert_eq!(result.available, PixelSize::new(990, 695));
        assert_eq!(posted_sizes(&api), vec![PixelSize::new(990, 695)]);
    }

    #[test]
    fn viewport_fills_area_while_render_is_constrained() {
        let api = Arc::new(RecordingWindowApi::new().with_renderer_window(RENDERER, 0, 0));
        let mut embedder = embedded(&api);
        let layout = LayoutSnapshot {
            container: Some(LogicalSize::new(1000.0, 633.0)),
            dpi_scale: 1.5,
            ..Default::default()
        };

        let result = sync().recompute(&layout, &mut embedder).unwrap();

        assert_eq!(result.available, PixelSize::new(1500, 949));
        assert_eq!(result.plan.viewport.pixels(), PixelSize::new(1500, 949));
        assert_eq!(result.plan.render.pixels(), PixelSize::new(1366, 768));
        assert_eq!(api.size_of(RENDERER), Some(PixelSize::new(1500, 949)));
    }

    #[test]
    fn placeholder_follows_container_origin() {
        let api = Arc::new(RecordingWindowApi::new().with_renderer_window(RENDERER, 0, 0));
        let mut embedder = embedded(&api);
        let placeholder = embedder.placeholder().unwrap();
        let layout = LayoutSnapshot {
            container: Some(LogicalSize::new(928.0, 720.0)),
            container_origin: LogicalPoint::new(328.0, 32.0),
            dpi_scale: 1.25,
            ..Default::default()
        };

        let result = sync().recompute(&layout, &mut embedder).unwrap();

        assert_eq!(result.origin, PixelPoint::new(410, 40));
        assert_eq!(api.origin_of(placeholder), Some(PixelPoint::new(410, 40)));
        assert_eq!(api.size_of(placeholder), Some(PixelSize::new(1160, 900)));
        assert_eq!(api.size_of(RENDERER), Some(PixelSize::new(1160, 900)));
        assert_eq!(api.origin_of(RENDERER), None);
        assert_eq!(embedder.origin(), PixelPoint::new(410, 40));
    }

    #[test]
    fn minimized_host_skips_recomputation() {
        let api = Arc::new(RecordingWindowApi::new().with_renderer_window(RENDERER, 0, 0));
        let mut embedder = embedded(&api);
        let layout = ResizingLayout::new(1024.0, 768.0);
        let mut sync = sync();
        let t0 = Instant::now();

        sync.signal(HostSignal::LayoutChanged, t0);
        sync.signal(HostSignal::WindowStateChanged(HostWindowState::Minimized), t0 + ms(1));
        sync.signal(HostSignal::LayoutChanged, t0 + ms(2));

        assert!(sync.next_deadline().is_none());
        assert!(sync.poll(t0 + ms(1000), &layout, &mut embedder).is_none());
        assert!(sync.recompute(&layout, &mut embedder).is_none());
        assert!(embedder.host_state().is_minimized());
        assert!(api.calls().is_empty());
    }

    #[test]
    fn restore_forces_recomputation() {
        let api = Arc::new(RecordingWindowApi::new().with_renderer_window(RENDERER, 0, 0));
        let mut embedder = embedded(&api);
        let layout = ResizingLayout::new(1024.0, 768.0);
        let mut sync = sync();
        let t0 = Instant::now();

        sync.signal(HostSignal::WindowStateChanged(HostWindowState::Minimized), t0);
        sync.signal(HostSignal::WindowStateChanged(HostWindowState::Normal), t0 + ms(100));

        assert_eq!(sync.next_deadline(), Some(t0 + ms(120)));
        let result = sync.poll(t0 + ms(120), &layout, &mut embedder).unwrap();
        assert_eq!(result.available, PixelSize::new(1024, 768));
        assert_eq!(posted_sizes(&api), vec![PixelSize::new(1024, 768)]);
    }

    #[test]
    fn cancel_drops_pending_and_later_signals() {
        let api = Arc::new(RecordingWindowApi::new().with_renderer_window(RENDERER, 0, 0));
        let mut embedder = embedded(&api);
        let layout = ResizingLayout::new(1024.0, 768.0);
        let mut sync = sync();
        let t0 = Instant::now();

        sync.signal(HostSignal::LayoutChanged, t0);
        sync.cancel();
        sync.signal(HostSignal::LayoutChanged, t0 + ms(1));

        assert!(sync.next_deadline().is_none());
        assert!(sync.poll(t0 + ms(1000), &layout, &mut embedder).is_none());
        assert_eq!(layout.reads.get(), 0);
    }

    #[test]
    fn unmeasurable_layout_is_skipped() {
        let api = Arc::new(RecordingWindowApi::new().with_renderer_window(RENDERER, 0, 0));
        let mut embedder = embedded(&api);
        let result = sync().recompute(&LayoutSnapshot::default(), &mut embedder);
        assert!(result.is_none());
        assert!(posted_sizes(&api).is_empty());
    }

    #[test]
    fn geometry_failure_does_not_stop_session() {
        let api = Arc::new(RecordingWindowApi::new().with_renderer_window(RENDERER, 0, 0));
        let mut embedder = embedded(&api);
        let layout = ResizingLayout::new(900.0, 700.0);
        let mut sync = sync();

        api.set_resize_failure(Some(1400));
        assert!(sync.recompute(&layout, &mut embedder).is_some());

        api.set_resize_failure(None);
        layout.resize(950.0, 700.0);
        sync.recompute(&layout, &mut embedder).unwrap();
        assert_eq!(api.size_of(RENDERER), Some(PixelSize::new(950, 700)));
    }

    #[tokio::test]
    async fn late_window_is_embedded_on_recomputation() {
        let api = Arc::new(RecordingWindowApi::new().with_renderer_window(RENDERER, 0, 0));
        let mut embedder = WindowEmbedder::create(api.clone(), HOST, Duration::ZERO).unwrap();
        embedder
            .embed(EmbeddedProcess::new(Box::new(ScriptedProcess::running(1)), PathBuf::from("r.exe")))
            .unwrap();
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();
        let mut sync = sync()
            .with_discovery_retry(WindowSignature::new("cls", "title"))
            .with_events(bus);

        sync.recompute(&ResizingLayout::new(1280.0, 720.0), &mut embedder)
            .unwrap();

        assert_eq!(embedder.renderer_window(), Some(RENDERER));
        assert!(matches!(rx.recv().await.unwrap(), Event::RendererEmbedded(RENDERER)));
        assert!(matches!(rx.recv().await.unwrap(), Event::ViewportResized { .. }));
        assert_eq!(posted_sizes(&api).last(), Some(&PixelSize::new(1280, 720)));
    }

    #[tokio::test]
    async fn renderer_exit_is_published() {
        let api = Arc::new(RecordingWindowApi::new().with_renderer_window(RENDERER, 0, 0));
        let process = ScriptedProcess::running(1);
        let mut embedder = WindowEmbedder::create(api.clone(), HOST, Duration::ZERO).unwrap();
        let mut embedded = EmbeddedProcess::new(Box::new(process.clone()), PathBuf::from("r.exe"));
        embedded.attach_window(RENDERER);
        embedder.embed(embedded).unwrap();
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();
        let mut sync = sync().with_events(bus);

        process.exit();
        sync.recompute(&ResizingLayout::new(1280.0, 720.0), &mut embedder);

        assert!(matches!(rx.recv().await.unwrap(), Event::RendererExited));
        assert!(embedder.renderer_window().is_none());
    }
}
