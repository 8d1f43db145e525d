//! Renderer process creation.

use std::path::Path;
use std::process::{Command, Stdio};

use hostview_common::{EmbedError, WindowHandle};

use super::process::ChildProcess;

/// Argument announcing the host window to the renderer.
pub const PARENT_HWND_ARG: &str = "--parent-hwnd";

/// `<executable> --parent-hwnd <id>`, run from the executable's directory
/// with inherited standard streams.
pub fn renderer_command(executable: &Path, host: WindowHandle) -> Command {
    let mut command = Command::new(executable);
    command
        .arg(PARENT_HWND_ARG)
        .arg(host.as_i64().to_string())
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    if let Some(dir) = executable.parent().filter(|d| !d.as_os_str().is_empty()) {
        command.current_dir(dir);
    }
    command
}

pub fn spawn_renderer(executable: &Path, host: WindowHandle) -> Result<ChildProcess, EmbedError> {
    let child = renderer_command(executable, host)
        .spawn()
        .map_err(|e| EmbedError::SpawnFailed {
            path: executable.to_path_buf(),
            reason: e.to_string(),
        })?;
    tracing::info!(
        pid = child.id(),
        path = %executable.display(),
        host = %host,
        "Renderer process started"
    );
    Ok(ChildProcess::new(child))
}
