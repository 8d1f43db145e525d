//! Ordered, best-effort teardown: renderer process first, placeholder last.

use std::time::{Duration, Instant};

use hostview_platform::WindowMessage;

use super::window::WindowEmbedder;
use crate::launcher::{EmbeddedProcess, ProcessState};

const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

impl WindowEmbedder {
    /// Terminate the renderer, then destroy the placeholder.
    ///
    /// The renderer is asked to close and given the grace period before it
    /// is killed. Failures are logged and swallowed. Calling this again is
    /// a no-op.
    pub fn destroy(&mut self) {
        if let Some(process) = self.process.take() {
            self.terminate(process);
        }

        if let Some(placeholder) = self.placeholder.take() {
            match self.api.destroy_window(placeholder) {
                Ok(()) => tracing::debug!(placeholder = %placeholder, "Placeholder window destroyed"),
                Err(e) => tracing::warn!(error = %e, "Failed to destroy placeholder window"),
            }
        }
    }

    /// Ask `process` to close, then kill it once the grace period runs out.
    pub(super) fn terminate(&self, mut process: EmbeddedProcess) {
        if process.poll_exit() {
            return;
        }
        let pid = process.pid();

        if let Some(window) = process.window() {
            if let Err(e) = self.api.post_message(window, WindowMessage::Close) {
                tracing::warn!(pid, error = %e, "Failed to request renderer close");
            }
        }

        if wait_for_exit(&mut process, self.shutdown_grace) {
            tracing::info!(pid, "Renderer exited");
            return;
        }

        match process.kill() {
            Ok(()) => tracing::info!(pid, "Renderer killed after grace period"),
            Err(e) => tracing::warn!(pid, error = %e, "Failed to kill renderer"),
        }
    }
}

fn wait_for_exit(process: &mut EmbeddedProcess, grace: Duration) -> bool {
    let deadline = Instant::now() + grace;
    loop {
        if process.poll_exit() {
            return true;
        }
        let now = Instant::now();
        if now >= deadline {
            return process.state() == ProcessState::Exited;
        }
        std::thread::sleep(EXIT_POLL_INTERVAL.min(deadline - now));
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;

    use hostview_common::WindowHandle;
    use hostview_platform::recording::{NativeCall, RecordingWindowApi};
    use hostview_platform::WindowMessage;

    use crate::embedder::WindowEmbedder;
    use crate::launcher::{EmbeddedProcess, ScriptedProcess};

    const HOST: WindowHandle = WindowHandle(0x10);
    const RENDERER: WindowHandle = WindowHandle(0x50);

    fn setup(process: &ScriptedProcess, grace: Duration) -> (Arc<RecordingWindowApi>, WindowEmbedder) {
        let api = Arc::new(RecordingWindowApi::new().with_renderer_window(RENDERER, 0, 0));
        let mut embedder = WindowEmbedder::create(api.clone(), HOST, grace).unwrap();
        let mut embedded = EmbeddedProcess::new(Box::new(process.clone()), PathBuf::from("r.exe"));
        embedded.attach_window(RENDERER);
        embedder.embed(embedded).unwrap();
        api.clear_calls();
        (api, embedder)
    }

    #[test]
    fn process_terminated_before_placeholder_destroyed() {
        let process = ScriptedProcess::running(1);
        let (api, mut embedder) = setup(&process, Duration::ZERO);
        let placeholder = embedder.placeholder().unwrap();

        embedder.destroy();

        assert!(process.was_killed());
        assert_eq!(
            api.calls(),
            vec![
                NativeCall::Post {
                    window: RENDERER,
                    message: WindowMessage::Close
                },
                NativeCall::Destroy(placeholder),
            ]
        );
        assert!(embedder.placeholder().is_none());
    }

    #[test]
    fn graceful_exit_avoids_kill() {
        // Exits on the second status check, inside the grace period.
        let process = ScriptedProcess::exiting_after(1, 1);
        let (_api, mut embedder) = setup(&process, Duration::from_secs(1));

        embedder.destroy();
        assert!(!process.was_killed());
    }

    #[test]
    fn already_exited_process_is_left_alone() {
        let process = ScriptedProcess::running(1);
        let (api, mut embedder) = setup(&process, Duration::ZERO);
        let placeholder = embedder.placeholder().unwrap();
        process.exit();

        embedder.destroy();
        assert!(!process.was_killed());
        assert_eq!(api.calls(), vec![NativeCall::Destroy(placeholder)]);
    }

    #[test]
    fn destroy_is_idempotent() {
        let process = ScriptedProcess::running(1);
        let (api, mut embedder) = setup(&process, Duration::ZERO);

        embedder.destroy();
        let after_first = api.calls().len();
        embedder.destroy();
        drop(embedder);
        assert_eq!(api.calls().len(), after_first);
    }

    #[test]
    fn drop_tears_down() {
        let process = ScriptedProcess::running(1);
        let (api, embedder) = setup(&process, Duration::ZERO);
        let placeholder = embedder.placeholder().unwrap();

        drop(embedder);
        assert!(process.was_killed());
        assert!(!api.is_live(placeholder));
    }

    #[test]
    fn updates_after_destroy_are_ignored() {
        let process = ScriptedProcess::running(1);
        let (api, mut embedder) = setup(&process, Duration::ZERO);
        embedder.destroy();
        api.clear_calls();

        embedder.update_size(800, 600).unwrap();
        assert!(api.calls().is_empty());
    }
}
