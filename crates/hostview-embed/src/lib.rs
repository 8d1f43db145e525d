//! Embedding core for the Hostview editor shell.
//!
//! - [`planner`]: viewport and render resolution planning (pure).
//! - [`launcher`]: renderer executable lookup, spawn and window discovery.
//! - [`embedder`]: placeholder window, reparenting, geometry and teardown.
//! - [`sync`]: debounced resize synchronization.

pub mod embedder;
pub mod launcher;
pub mod planner;
pub mod sync;

pub use embedder::WindowEmbedder;
pub use launcher::{EmbeddedProcess, ProcessLauncher, ProcessState};
pub use planner::{Plan, RenderResolution, ResolutionPlanner, ViewportSize};
pub use sync::{HostSignal, LayoutSource, LayoutSnapshot, ResizeSynchronizer};
