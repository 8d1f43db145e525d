//! Debounce windows for host layout signals.

use serde::{Deserialize, Serialize};

/// Quiet period (ms) each signal type must observe before a recomputation runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    pub layout_debounce_ms: u64,
    pub window_state_debounce_ms: u64,
    pub dpi_debounce_ms: u64,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            layout_debounce_ms: 40,
            window_state_debounce_ms: 20,
            dpi_debounce_ms: 60,
        }
    }
}
