//! Debounced resize synchronization between the host layout and the
//! embedded renderer.

mod debounce;
mod measure;
mod synchronizer;

pub use debounce::{DebounceWindows, Debouncer, HostSignal};
pub use measure::{available_size, LayoutSource, LayoutSnapshot, MeasureSource};
pub use synchronizer::{Recomputation, ResizeSynchronizer};
