//! Ordered teardown of the embedding session.

use std::time::Duration;

use hostview_common::Event;

use super::core::HostviewApp;

impl HostviewApp {
    /// Tear down in order:
    /// 1. Cancel window discovery
    /// 2. Drop any pending resize recomputation
    /// 3. Shut down the tokio runtime so the launch task has finished
    /// 4. Take over a launch result nobody has read yet
    /// 5. Terminate the renderer, then destroy the placeholder
    pub(super) fn shutdown(&mut self) {
        tracing::info!("Initiating shutdown");
        self.event_bus.publish(Event::Shutdown);

        self.cancel.cancel();
        self.sync.cancel();

        if let Some(rt) = self.tokio_runtime.take() {
            rt.shutdown_timeout(Duration::from_secs(2));
        }
        self.collect_pending_launch();

        if let Some(mut embedder) = self.embedder.take() {
            embedder.destroy();
        }

        self.should_exit = true;
        tracing::info!("Shutdown complete");
    }

    /// A renderer that finished launching after the last poll still has to
    /// be terminated: hand it to the embedder, or kill it if there is none.
    fn collect_pending_launch(&mut self) {
        let Some(rx) = self.launch_rx.take() else {
            return;
        };
        let Ok(Ok(mut process)) = rx.try_recv() else {
            return;
        };
        tracing::debug!(pid = process.pid(), "Collecting renderer launched during shutdown");
        match self.embedder.as_mut() {
            Some(embedder) => {
                if let Err(e) = embedder.embed(process) {
                    tracing::warn!(error = %e, "Failed to embed renderer during shutdown");
                }
            }
            None => {
                if let Err(e) = process.kill() {
                    tracing::warn!(pid = process.pid(), error = %e, "Failed to kill renderer");
                }
            }
        }
    }
}
