use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failure reported by a native window back end.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    #[error("{operation} failed (platform error {code})")]
    NativeApi { operation: &'static str, code: i32 },

    #[error("not supported: {0}")]
    NotSupported(String),
}

impl PlatformError {
    /// Platform error code carried by a native failure, if any.
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::NativeApi { code, .. } => Some(*code),
            Self::NotSupported(_) => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EmbedError {
    #[error("renderer executable not found, searched:\n{}", format_paths(.attempted))]
    ExecutableNotFound { attempted: Vec<PathBuf> },

    #[error("failed to start {}: {reason}", .path.display())]
    SpawnFailed { path: PathBuf, reason: String },

    #[error("could not create host window: {0}")]
    HostWindowCreationFailed(#[source] PlatformError),

    #[error("renderer window did not appear after {attempts} attempts")]
    WindowDiscoveryTimedOut { attempts: u32 },

    #[error("native api failure: {0}")]
    NativeApiFailure(#[from] PlatformError),

    #[error("launch cancelled because the host is shutting down")]
    LaunchCancelled,
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, thiserror::Error)]
pub enum HostviewError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
