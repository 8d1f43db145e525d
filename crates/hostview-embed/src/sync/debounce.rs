//! Deadline-based debouncing of host signals.
//!
//! The debouncer never sleeps or spawns: the host's event loop asks for
//! [`Debouncer::next_deadline`], wakes up then, and calls
//! [`Debouncer::poll`].

use std::time::{Duration, Instant};

use hostview_common::HostWindowState;
use hostview_config::schema::ResizeConfig;

/// A change observed in the host that may affect the available area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostSignal {
    LayoutChanged,
    WindowStateChanged(HostWindowState),
    DpiChanged(f64),
}

/// Settling time per signal type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceWindows {
    pub layout: Duration,
    pub window_state: Duration,
    pub dpi: Duration,
}

impl DebounceWindows {
    pub fn from_config(config: &ResizeConfig) -> Self {
        Self {
            layout: Duration::from_millis(config.layout_debounce_ms),
            window_state: Duration::from_millis(config.window_state_debounce_ms),
            dpi: Duration::from_millis(config.dpi_debounce_ms),
        }
    }

    pub fn for_signal(&self, signal: &HostSignal) -> Duration {
        match signal {
            HostSignal::LayoutChanged => self.layout,
            HostSignal::WindowStateChanged(_) => self.window_state,
            HostSignal::DpiChanged(_) => self.dpi,
        }
    }
}

impl Default for DebounceWindows {
    fn default() -> Self {
        Self::from_config(&ResizeConfig::default())
    }
}

/// Single pending evaluation; every schedule replaces the previous one.
#[derive(Debug, Clone)]
pub struct Debouncer {
    windows: DebounceWindows,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(windows: DebounceWindows) -> Self {
        Self {
            windows,
            deadline: None,
        }
    }

    pub fn schedule(&mut self, signal: &HostSignal, now: Instant) {
        self.deadline = Some(now + self.windows.for_signal(signal));
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// `true` once, when the pending deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop the pending evaluation, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn fires_once_after_window() {
        let mut debouncer = Debouncer::new(DebounceWindows::default());
        let t0 = Instant::now();
        debouncer.schedule(&HostSignal::LayoutChanged, t0);

        assert!(!debouncer.poll(t0 + ms(39)));
        assert!(debouncer.poll(t0 + ms(40)));
        assert!(!debouncer.poll(t0 + ms(100)));
    }

    #[test]
    fn burst_keeps_pushing_deadline() {
        let mut debouncer = Debouncer::new(DebounceWindows::default());
        let t0 = Instant::now();
        for i in 0..10 {
            debouncer.schedule(&HostSignal::LayoutChanged, t0 + ms(i * 10));
        }
        assert_eq!(debouncer.next_deadline(), Some(t0 + ms(130)));
        assert!(!debouncer.poll(t0 + ms(129)));
        assert!(debouncer.poll(t0 + ms(130)));
    }

    #[test]
    fn each_signal_uses_its_window() {
        let windows = DebounceWindows::default();
        assert_eq!(windows.for_signal(&HostSignal::LayoutChanged), ms(40));
        assert_eq!(
            windows.for_signal(&HostSignal::WindowStateChanged(HostWindowState::Maximized)),
            ms(20)
        );
        assert_eq!(windows.for_signal(&HostSignal::DpiChanged(1.5)), ms(60));
    }

    #[test]
    fn last_signal_wins() {
        let mut debouncer = Debouncer::new(DebounceWindows::default());
        let t0 = Instant::now();
        debouncer.schedule(&HostSignal::DpiChanged(2.0), t0);
        debouncer.schedule(&HostSignal::WindowStateChanged(HostWindowState::Normal), t0);
        assert_eq!(debouncer.next_deadline(), Some(t0 + ms(20)));
    }

    #[test]
    fn cancel_drops_pending() {
        let mut debouncer = Debouncer::new(DebounceWindows::default());
        let t0 = Instant::now();
        debouncer.schedule(&HostSignal::LayoutChanged, t0);
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        assert!(!debouncer.poll(t0 + ms(1000)));
    }
}
