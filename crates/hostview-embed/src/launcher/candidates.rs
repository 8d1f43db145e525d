//! Renderer executable lookup.

use std::path::{Path, PathBuf};

use hostview_common::EmbedError;

/// Levels between the editor executable and the project root in a build tree.
const PROJECT_ROOT_DEPTH: usize = 6;

/// Build-output directory searched below project and working directories.
fn build_output(base: &Path, name: &str) -> PathBuf {
    base.join("x64").join("Debug").join(name)
}

/// Built-in search list for the renderer executable.
///
/// Relative entries are resolved against the working directory by
/// [`resolve_executable`]. Duplicates are removed, first occurrence wins.
pub fn default_candidates(exe_dir: &Path, cwd: &Path, name: &str) -> Vec<PathBuf> {
    let mut candidates = vec![exe_dir.join(name)];

    if let Some(project_root) = exe_dir.ancestors().nth(PROJECT_ROOT_DEPTH) {
        candidates.push(build_output(project_root, name));
        if let Some(parent) = project_root.parent() {
            candidates.push(build_output(parent, name));
        }
    }

    candidates.push(build_output(cwd, name));
    candidates.push(build_output(Path::new(""), name));
    candidates.push(build_output(&Path::new("..").join("..").join("..").join("..").join(".."), name));
    candidates.push(PathBuf::from(name));

    dedup(candidates)
}

/// Full candidate list: explicit paths first, then the built-in list.
pub fn candidate_list(
    explicit: impl IntoIterator<Item = PathBuf>,
    exe_dir: &Path,
    cwd: &Path,
    name: &str,
) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = explicit.into_iter().collect();
    candidates.extend(default_candidates(exe_dir, cwd, name));
    dedup(candidates)
}

/// Return the first candidate that is an existing file.
///
/// Fails with [`EmbedError::ExecutableNotFound`] listing every path tried,
/// in resolved form.
pub fn resolve_executable(candidates: &[PathBuf], cwd: &Path) -> Result<PathBuf, EmbedError> {
    let mut attempted = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let path = if candidate.is_absolute() {
            candidate.clone()
        } else {
            cwd.join(candidate)
        };
        if path.is_file() {
            tracing::debug!(path = %path.display(), "Resolved renderer executable");
            return Ok(path);
        }
        attempted.push(path);
    }
    Err(EmbedError::ExecutableNotFound { attempted })
}

fn dedup(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut unique: Vec<PathBuf> = Vec::with_capacity(paths.len());
    for path in paths {
        if !unique.contains(&path) {
            unique.push(path);
        }
    }
    unique
}
