pub mod errors;
pub mod events;
pub mod types;

pub use errors::{ConfigError, EmbedError, HostviewError, PlatformError};
pub use events::{Event, EventBus};
pub use types::{HostWindowState, LogicalPoint, LogicalSize, PixelPoint, PixelSize, WindowHandle};

pub type Result<T> = std::result::Result<T, HostviewError>;
