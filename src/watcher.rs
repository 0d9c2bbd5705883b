//! Repository watcher for automatic reload.
//!
//! Watches the git directory (index, HEAD, branch refs) and the directories of
//! tracked files, so staging, committing and saving a file all refresh the
//! diff. Only used when the diff comes from `git diff`.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::mpsc::{Receiver, channel};

use anyhow::{Context, Result, bail};
use notify::{
    Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher, event::ModifyKind,
};

/// Files directly inside the git directory that change on stage, commit or checkout.
const GIT_STATE_FILES: &[&str] = &["index", "HEAD"];

pub struct GitWatcher {
    /// Kept alive to keep watching.
    _watcher: RecommendedWatcher,
    changes: Receiver<()>,
}

impl GitWatcher {
    pub fn new() -> Result<Self> {
        let git_dir = git_output(&["rev-parse", "--git-dir"])?;
        let git_dir = PathBuf::from(git_dir.trim())
            .canonicalize()
            .context("Failed to resolve the git directory")?;

        let (tx, rx) = channel();
        let filter_dir = git_dir.clone();
        let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
            match result {
                Ok(event) if is_relevant(&event, &filter_dir) => {
                    log::debug!("Repository changed: {:?}", event.paths);
                    // Fails only once the UI has shut down
                    let _ = tx.send(());
                }
                Ok(_) => {}
                Err(err) => log::warn!("File watcher error: {err}"),
            }
        })
        .context("Failed to create file watcher")?;

        watcher
            .watch(&git_dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {}", git_dir.display()))?;

        let mut dirs = match git_output(&["ls-files", "-z"]) {
            Ok(output) => tracked_dirs(&output),
            Err(err) => {
                log::warn!("Not watching working tree files: {err:#}");
                BTreeSet::new()
            }
        };
        dirs.insert(git_dir.join("refs").join("heads"));

        // Watch what we can; a missing directory only loses its reloads
        let mut watched = 1;
        for dir in &dirs {
            match watcher.watch(dir, RecursiveMode::NonRecursive) {
                Ok(()) => watched += 1,
                Err(err) => log::debug!("Skipping watch on {}: {err}", dir.display()),
            }
        }
        log::info!("Auto-reload: watching {watched} directories");

        Ok(Self {
            _watcher: watcher,
            changes: rx,
        })
    }

    /// Whether anything changed since the last call. Drains pending
    /// notifications so a burst of writes causes a single reload.
    pub fn changed(&self) -> bool {
        self.changes.try_iter().count() > 0
    }
}

fn git_output(args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .output()
        .context("Failed to run git")?;
    if !output.status.success() {
        bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parent directories of the NUL-separated paths printed by `git ls-files -z`.
fn tracked_dirs(ls_files: &str) -> BTreeSet<PathBuf> {
    ls_files
        .split('\0')
        .filter(|path| !path.is_empty())
        .map(|path| match Path::new(path).parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        })
        .collect()
}

fn is_relevant(event: &Event, git_dir: &Path) -> bool {
    match event.kind {
        // chmod and friends
        EventKind::Modify(ModifyKind::Metadata(_)) => return false,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_) => {}
        _ => return false,
    }

    event.paths.iter().any(|path| match path.strip_prefix(git_dir) {
        Ok(inner) => {
            inner.starts_with("refs") || GIT_STATE_FILES.iter().any(|f| inner == Path::new(f))
        }
        Err(_) => true,
    })
}
