//! HostviewApp struct definition and constructor.

use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use winit::window::Window;

use hostview_common::{EmbedError, Event, EventBus};
use hostview_config::HostviewConfig;
use hostview_embed::{EmbeddedProcess, ResizeSynchronizer, WindowEmbedder};
use hostview_platform::NativeWindowApi;

use super::layout::EditorLayout;

/// Top-level application state.
pub struct HostviewApp {
    pub(super) config: HostviewConfig,
    pub(super) api: Arc<dyn NativeWindowApi>,
    pub(super) candidates: Vec<PathBuf>,
    pub(super) working_dir: PathBuf,

    // Status reporting
    pub(super) event_bus: EventBus,
    pub(super) events_rx: broadcast::Receiver<Event>,
    pub(super) status: String,

    // Windowing
    pub(super) window: Option<Arc<Window>>,
    pub(super) layout: EditorLayout,

    // Embedding
    pub(super) embedder: Option<WindowEmbedder>,
    pub(super) sync: ResizeSynchronizer,
    pub(super) launch_rx: Option<Receiver<Result<EmbeddedProcess, EmbedError>>>,
    pub(super) cancel: CancellationToken,
    pub(super) tokio_runtime: Option<tokio::runtime::Runtime>,

    pub(super) should_exit: bool,
    pub(super) last_exit_check: Instant,
}

impl HostviewApp {
    pub fn new(
        config: HostviewConfig,
        api: Arc<dyn NativeWindowApi>,
        candidates: Vec<PathBuf>,
        working_dir: PathBuf,
    ) -> Self {
        let event_bus = EventBus::new(64);
        let events_rx = event_bus.subscribe();
        let sync = ResizeSynchronizer::from_config(&config).with_events(event_bus.clone());
        let layout = EditorLayout::from_config(&config.layout);
        Self {
            config,
            api,
            candidates,
            working_dir,
            event_bus,
            events_rx,
            status: "starting".into(),
            window: None,
            layout,
            embedder: None,
            sync,
            launch_rx: None,
            cancel: CancellationToken::new(),
            tokio_runtime: None,
            should_exit: false,
            last_exit_check: Instant::now(),
        }
    }
}

#[cfg(test)]
pub(super) fn test_app() -> HostviewApp {
    HostviewApp::new(
        HostviewConfig::default(),
        Arc::new(hostview_platform::recording::RecordingWindowApi::new()),
        Vec::new(),
        std::env::temp_dir(),
    )
}
