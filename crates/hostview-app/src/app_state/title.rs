//! Window title management: reflects renderer status.

use super::core::HostviewApp;

impl HostviewApp {
    /// Format: "{title} - {status}"
    pub(super) fn window_title(&self) -> String {
        format!("{} - {}", self.config.layout.title, self.status)
    }

    pub(super) fn update_window_title(&self) {
        let Some(ref window) = self.window else {
            return;
        };
        window.set_title(&self.window_title());
    }
}
