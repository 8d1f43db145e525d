//! External renderer process settings.

use serde::{Deserialize, Serialize};

/// Where to find the renderer executable and how to recognise its window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// File name searched for in the built-in candidate locations.
    pub executable_name: String,
    /// Explicit paths tried before the built-in candidate locations.
    pub candidates: Vec<String>,
    /// Native window class registered by the renderer.
    pub window_class: String,
    /// Title of the renderer's top-level window.
    pub window_title: String,
    /// Delay between window lookups after spawn (ms).
    pub discovery_interval_ms: u64,
    /// Maximum number of window lookups before giving up.
    pub discovery_max_attempts: u32,
    /// How long teardown waits for the renderer to exit before killing it (ms).
    pub shutdown_grace_ms: u64,
    /// Retry window discovery on later resize cycles when the first search timed out.
    pub retry_discovery: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            executable_name: "DirectX12Test.exe".into(),
            candidates: Vec::new(),
            window_class: "DirectX12WindowClass".into(),
            window_title: "DirectX 12 - RTX 3060 12GB".into(),
            discovery_interval_ms: 100,
            discovery_max_attempts: 50,
            shutdown_grace_ms: 1000,
            retry_discovery: true,
        }
    }
}
