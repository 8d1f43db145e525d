//! Asynchronous renderer window discovery.

use std::time::Duration;

use hostview_common::WindowHandle;
use hostview_config::schema::RendererConfig;
use hostview_platform::{NativeWindowApi, WindowSignature};
use tokio_util::sync::CancellationToken;

use super::process::RendererProcess;

/// How often and how many times to look for the renderer window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl DiscoveryPolicy {
    pub fn from_config(config: &RendererConfig) -> Self {
        Self {
            interval: Duration::from_millis(config.discovery_interval_ms),
            max_attempts: config.discovery_max_attempts,
        }
    }
}

impl Default for DiscoveryPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
            max_attempts: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryOutcome {
    Found(WindowHandle),
    TimedOut { attempts: u32 },
    ProcessExited,
    Cancelled,
}

/// Poll for the renderer window until it appears, the process exits, the
/// attempt budget runs out or `cancel` fires.
///
/// Each attempt waits one interval and then performs a single lookup.
pub async fn discover_window(
    api: &dyn NativeWindowApi,
    signature: &WindowSignature,
    process: &mut dyn RendererProcess,
    policy: DiscoveryPolicy,
    cancel: &CancellationToken,
) -> DiscoveryOutcome {
    for attempt in 1..=policy.max_attempts {
        if process.has_exited() {
            tracing::warn!(pid = process.id(), attempt, "Renderer exited before its window appeared");
            return DiscoveryOutcome::ProcessExited;
        }

        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!(attempt, "Window discovery cancelled");
                return DiscoveryOutcome::Cancelled;
            }
            _ = tokio::time::sleep(policy.interval) => {}
        }

        if let Some(window) = api.find_window(signature) {
            tracing::info!(window = %window, attempt, "Renderer window found");
            return DiscoveryOutcome::Found(window);
        }
    }

    DiscoveryOutcome::TimedOut {
        attempts: policy.max_attempts,
    }
}
