use std::io::{self, Read};
use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to run git: {0}")]
    Spawn(#[source] io::Error),
    #[error("git diff exited with {code}: {stderr}")]
    GitFailed { code: String, stderr: String },
    #[error("Failed to read diff from {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Where the raw diff text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffSource {
    /// Run `git diff` with extra arguments (e.g. "HEAD~1", "main..feature").
    Git { args: Vec<String>, staged: bool },
    File(PathBuf),
    Stdin,
}

impl DiffSource {
    pub fn from_args(diff_args: &str, staged: bool, file: Option<PathBuf>) -> Self {
        match file {
            Some(path) if path.as_os_str() == "-" => DiffSource::Stdin,
            Some(path) => DiffSource::File(path),
            None => DiffSource::Git {
                args: diff_args.split_whitespace().map(str::to_string).collect(),
                staged,
            },
        }
    }

    pub fn read(&self) -> Result<String, SourceError> {
        match self {
            DiffSource::Git { args, staged } => run_git_diff(args, *staged),
            DiffSource::File(path) => std::fs::read(path)
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                .map_err(|source| SourceError::Read {
                    path: path.display().to_string(),
                    source,
                }),
            DiffSource::Stdin => {
                let mut bytes = Vec::new();
                io::stdin()
                    .read_to_end(&mut bytes)
                    .map_err(|source| SourceError::Read {
                        path: "stdin".to_string(),
                        source,
                    })?;
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
        }
    }
}

fn git_diff_command(args: &[String], staged: bool) -> Command {
    let mut cmd = Command::new("git");
    cmd.arg("diff").arg("--no-color").arg("--no-ext-diff");
    if staged {
        cmd.arg("--staged");
    }
    cmd.args(args);
    cmd
}

fn run_git_diff(args: &[String], staged: bool) -> Result<String, SourceError> {
    let mut cmd = git_diff_command(args, staged);
    log::info!("Running {cmd:?}");

    let output = cmd.output().map_err(SourceError::Spawn)?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        log::warn!("git diff failed: {stderr}");
        return Err(SourceError::GitFailed {
            code: output
                .status
                .code()
                .map_or_else(|| "a signal".to_string(), |c| c.to_string()),
            stderr,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
