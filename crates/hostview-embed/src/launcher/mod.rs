//! Renderer process launch: executable lookup, spawn and window discovery.

pub mod candidates;
mod discovery;
mod process;
mod spawn;

pub use candidates::{candidate_list, default_candidates, resolve_executable};
pub use discovery::{discover_window, DiscoveryOutcome, DiscoveryPolicy};
pub use process::{ChildProcess, EmbeddedProcess, ProcessState, RendererProcess, ScriptedProcess};
pub use spawn::{renderer_command, spawn_renderer, PARENT_HWND_ARG};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use hostview_common::{EmbedError, Event, EventBus, WindowHandle};
use hostview_config::schema::RendererConfig;
use hostview_platform::{NativeWindowApi, WindowSignature};
use tokio_util::sync::CancellationToken;

/// Starts the renderer and waits for its window.
pub struct ProcessLauncher {
    api: Arc<dyn NativeWindowApi>,
    signature: WindowSignature,
    policy: DiscoveryPolicy,
    working_dir: PathBuf,
    events: Option<EventBus>,
}

impl ProcessLauncher {
    pub fn new(
        api: Arc<dyn NativeWindowApi>,
        signature: WindowSignature,
        policy: DiscoveryPolicy,
        working_dir: PathBuf,
    ) -> Self {
        Self {
            api,
            signature,
            policy,
            working_dir,
            events: None,
        }
    }

    pub fn from_config(
        api: Arc<dyn NativeWindowApi>,
        config: &RendererConfig,
        working_dir: PathBuf,
    ) -> Self {
        Self::new(
            api,
            WindowSignature::new(&config.window_class, &config.window_title),
            DiscoveryPolicy::from_config(config),
            working_dir,
        )
    }

    /// Publish lifecycle events on `bus`.
    pub fn with_events(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn signature(&self) -> &WindowSignature {
        &self.signature
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Resolve, spawn and discover.
    ///
    /// A window that never appears is not an error: the process is returned
    /// in [`ProcessState::RunningNoWindow`]. Cancellation kills the process.
    pub async fn launch(
        &self,
        candidates: &[PathBuf],
        host: WindowHandle,
        cancel: &CancellationToken,
    ) -> Result<EmbeddedProcess, EmbedError> {
        let executable = match resolve_executable(candidates, &self.working_dir) {
            Ok(path) => path,
            Err(err) => {
                tracing::error!("{err}");
                self.publish(Event::LaunchFailed(err.to_string()));
                return Err(err);
            }
        };

        let process = match spawn_renderer(&executable, host) {
            Ok(process) => process,
            Err(err) => {
                tracing::error!("{err}");
                self.publish(Event::LaunchFailed(err.to_string()));
                return Err(err);
            }
        };

        self.attach(Box::new(process), executable, cancel).await
    }

    /// Discover the window of an already running renderer.
    pub async fn attach(
        &self,
        process: Box<dyn RendererProcess>,
        executable: PathBuf,
        cancel: &CancellationToken,
    ) -> Result<EmbeddedProcess, EmbedError> {
        let mut embedded = EmbeddedProcess::new(process, executable);
        self.publish(Event::RendererLaunched { pid: embedded.pid() });

        let outcome = discover_window(
            self.api.as_ref(),
            &self.signature,
            embedded.process_mut(),
            self.policy,
            cancel,
        )
        .await;

        match outcome {
            DiscoveryOutcome::Found(window) => {
                embedded.attach_window(window);
            }
            DiscoveryOutcome::TimedOut { attempts } => {
                let err = EmbedError::WindowDiscoveryTimedOut { attempts };
                tracing::warn!(
                    class = %self.signature.class_name,
                    title = %self.signature.title,
                    "{err}; continuing without it"
                );
                self.publish(Event::DiscoveryTimedOut { attempts });
            }
            DiscoveryOutcome::ProcessExited => {
                embedded.mark_exited();
                self.publish(Event::RendererExited);
            }
            DiscoveryOutcome::Cancelled => {
                if let Err(e) = embedded.kill() {
                    tracing::warn!(pid = embedded.pid(), error = %e, "Failed to kill renderer after cancellation");
                }
                return Err(EmbedError::LaunchCancelled);
            }
        }

        Ok(embedded)
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
    use hostview_platform::recording::{NativeCall, RecordingWindowApi};
    use std::time::Duration;

    fn launcher(api: Arc<RecordingWindowApi>, dir: &Path) -> ProcessLauncher {
        ProcessLauncher::new(
            api,
            WindowSignature::new("cls", "title"),
            DiscoveryPolicy {
                interval: Duration::from_millis(1),
                max_attempts: 8,
            },
            dir.to_path_buf(),
        )
    }

    #[tokio::test]
    async fn empty_candidates_fail_without_spawning() {
        let dir = tempfile::tempdir().unwrap();
        let api = Arc::new(RecordingWindowApi::new());
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();
        let launcher = launcher(api.clone(), dir.path()).with_events(bus);

        let err = launcher
            .launch(&[], WindowHandle(1), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, EmbedError::ExecutableNotFound { .. }));
        assert!(api.calls().is_empty());
        assert!(matches!(rx.recv().await.unwrap(), Event::LaunchFailed(_)));
    }

    #[tokio::test]
    async fn missing_candidates_are_listed() {
        let dir = tempfile::tempdir().unwrap();
        let api = Arc::new(RecordingWindowApi::new());
        let candidates = vec![PathBuf::from("one.exe"), PathBuf::from("two.exe")];

        let err = launcher(api, dir.path())
            .launch(&candidates, WindowHandle(1), &CancellationToken::new())
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("one.exe"));
        assert!(message.contains("two.exe"));
    }

    #[tokio::test]
    async fn attach_finds_window() {
        let dir = tempfile::tempdir().unwrap();
        let api = Arc::new(RecordingWindowApi::new().with_renderer_window(WindowHandle(0x90), 0, 2));
        let embedded = launcher(api.clone(), dir.path())
            .attach(
                Box::new(ScriptedProcess::running(4)),
                PathBuf::from("r.exe"),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(embedded.state(), ProcessState::Running);
        assert_eq!(embedded.window(), Some(WindowHandle(0x90)));
        assert_eq!(api.lookups(), 3);
        assert!(api
            .calls()
            .iter()
            .all(|c| matches!(c, NativeCall::Find(sig) if sig.class_name == "cls")));
    }

    #[tokio::test]
    async fn timeout_keeps_process_without_window() {
        let dir = tempfile::tempdir().unwrap();
        let api = Arc::new(RecordingWindowApi::new());
        let process = ScriptedProcess::running(4);
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();

        let embedded = launcher(api.clone(), dir.path())
            .with_events(bus)
            .attach(Box::new(process.clone()), PathBuf::from("r.exe"), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(embedded.state(), ProcessState::RunningNoWindow);
        assert!(embedded.window().is_none());
        assert_eq!(api.lookups(), 8);
        assert!(!process.was_killed());
        assert!(matches!(rx.recv().await.unwrap(), Event::RendererLaunched { pid: 4 }));
        assert!(matches!(
            rx.recv().await.unwrap(),
            Event::DiscoveryTimedOut { attempts: 8 }
        ));
    }

    #[tokio::test]
    async fn exited_process_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let api = Arc::new(RecordingWindowApi::new());
        let embedded = launcher(api, dir.path())
            .attach(
                Box::new(ScriptedProcess::exiting_after(4, 0)),
                PathBuf::from("r.exe"),
                &CancellationToken::new(),
            )
            .await
            .unwrap();
        assert_eq!(embedded.state(), ProcessState::Exited);
    }

    #[tokio::test]
    async fn cancellation_kills_process() {
        let dir = tempfile::tempdir().unwrap();
        let api = Arc::new(RecordingWindowApi::new());
        let process = ScriptedProcess::running(4);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = launcher(api, dir.path())
            .attach(Box::new(process.clone()), PathBuf::from("r.exe"), &cancel)
            .await
            .unwrap_err();

        assert!(matches!(err, EmbedError::LaunchCancelled));
        assert!(process.was_killed());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn launch_spawns_resolved_executable() {
        let dir = tempfile::tempdir().unwrap();
        let api = Arc::new(RecordingWindowApi::new().with_renderer_window(WindowHandle(0x90), 0, 0));
        let candidates = vec![PathBuf::from("missing"), PathBuf::from("/bin/sh")];

        let mut embedded = launcher(api, dir.path())
            .launch(&candidates, WindowHandle(3), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(embedded.executable(), Path::new("/bin/sh"));
        embedded.kill().unwrap();
    }
}
