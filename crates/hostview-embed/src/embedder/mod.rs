//! Placeholder window ownership, reparenting, geometry and teardown.

mod teardown;
mod window;

pub use window::{WindowEmbedder, FALLBACK_SIZE, PLACEHOLDER_SIZE};
