//! Renderer process handles.

use std::io;
use std::path::PathBuf;
use std::process::Child;
use std::sync::{Arc, Mutex, MutexGuard};

use hostview_common::WindowHandle;

/// Lifecycle state of an [`EmbeddedProcess`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    /// Running with its window discovered.
    Running,
    /// Running, but no window appeared before discovery gave up.
    RunningNoWindow,
    /// The process is gone.
    Exited,
}

/// The operations the core needs on a spawned renderer.
pub trait RendererProcess: Send {
    fn id(&self) -> u32;
    fn has_exited(&mut self) -> bool;
    /// Force termination and reap the process. Killing an already exited
    /// process succeeds.
    fn kill(&mut self) -> io::Result<()>;
}

/// A renderer spawned through `std::process`.
pub struct ChildProcess {
    child: Child,
}

impl ChildProcess {
    pub fn new(child: Child) -> Self {
        Self { child }
    }
}

impl RendererProcess for ChildProcess {
    fn id(&self) -> u32 {
        self.child.id()
    }

    fn has_exited(&mut self) -> bool {
        match self.child.try_wait() {
            Ok(status) => status.is_some(),
            Err(e) => {
                tracing::warn!(pid = self.child.id(), error = %e, "Failed to query renderer status");
                false
            }
        }
    }

    fn kill(&mut self) -> io::Result<()> {
        if self.has_exited() {
            return Ok(());
        }
        self.child.kill()?;
        self.child.wait().map(|_| ())
    }
}

#[derive(Debug, Default)]
struct Script {
    exit_after: Option<u32>,
    checks: u32,
    exited: bool,
    killed: bool,
}

/// Scriptable in-memory process for tests.
///
/// Clones share state, so a test can keep a handle after boxing one into
/// an [`EmbeddedProcess`].
#[derive(Debug, Clone)]
pub struct ScriptedProcess {
    id: u32,
    script: Arc<Mutex<Script>>,
}

impl ScriptedProcess {
    /// A process that runs until killed.
    pub fn running(id: u32) -> Self {
        Self {
            id,
            script: Arc::new(Mutex::new(Script::default())),
        }
    }

    /// A process that reports exit from status check number `checks + 1`.
    pub fn exiting_after(id: u32, checks: u32) -> Self {
        let process = Self::running(id);
        process.lock().exit_after = Some(checks);
        process
    }

    /// Simulate the process exiting on its own.
    pub fn exit(&self) {
        self.lock().exited = true;
    }

    pub fn was_killed(&self) -> bool {
        self.lock().killed
    }

    /// Number of `has_exited` calls so far.
    pub fn checks(&self) -> u32 {
        self.lock().checks
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl RendererProcess for ScriptedProcess {
    fn id(&self) -> u32 {
        self.id
    }

    fn has_exited(&mut self) -> bool {
        let mut script = self.lock();
        script.checks += 1;
        if script.exit_after.is_some_and(|n| script.checks > n) {
            script.exited = true;
        }
        script.exited
    }

    fn kill(&mut self) -> io::Result<()> {
        let mut script = self.lock();
        if !script.exited {
            script.killed = true;
            script.exited = true;
        }
        Ok(())
    }
}

/// A launched renderer and what is known about its window.
pub struct EmbeddedProcess {
    process: Box<dyn RendererProcess>,
    window: Option<WindowHandle>,
    state: ProcessState,
    executable: PathBuf,
}

impl EmbeddedProcess {
    pub fn new(process: Box<dyn RendererProcess>, executable: PathBuf) -> Self {
        Self {
            process,
            window: None,
            state: ProcessState::RunningNoWindow,
            executable,
        }
    }

    pub fn pid(&self) -> u32 {
        self.process.id()
    }

    pub fn window(&self) -> Option<WindowHandle> {
        self.window
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn executable(&self) -> &std::path::Path {
        &self.executable
    }

    /// Associate the discovered window. Returns `false` and leaves the
    /// existing association alone if one is already set or the process
    /// has exited.
    pub fn attach_window(&mut self, window: WindowHandle) -> bool {
        if self.window.is_some() || self.state == ProcessState::Exited {
            return false;
        }
        self.window = Some(window);
        self.state = ProcessState::Running;
        true
    }

    /// Forget a window that no longer exists while the process keeps
    /// running. Returns `false` if there was no live association.
    pub fn detach_window(&mut self) -> bool {
        if self.state != ProcessState::Running {
            return false;
        }
        self.window = None;
        self.state = ProcessState::RunningNoWindow;
        true
    }

    /// Force the process down without asking it to close first.
    pub fn kill(&mut self) -> io::Result<()> {
        self.process.kill()?;
        self.mark_exited();
        Ok(())
    }

    pub(crate) fn process_mut(&mut self) -> &mut dyn RendererProcess {
        self.process.as_mut()
    }

    /// Record that the process is gone and drop the window association.
    pub fn mark_exited(&mut self) {
        self.window = None;
        self.state = ProcessState::Exited;
    }

    /// Check the process and update the state. Returns `true` if it has
    /// exited.
    pub fn poll_exit(&mut self) -> bool {
        if self.state == ProcessState::Exited {
            return true;
        }
        if self.process.has_exited() {
            self.mark_exited();
            return true;
        }
        false
    }
}

impl std::fmt::Debug for EmbeddedProcess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddedProcess")
            .field("pid", &self.process.id())
            .field("window", &self.window)
            .field("state", &self.state)
            .field("executable", &self.executable)
            .finish()
    }
}
