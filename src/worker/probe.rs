//! Version-control probing.
//!
//! [`VcsProbe`] maps a directory to a [`GitStatus`]. [`GitCli`] implements it
//! by shelling out to the `git` binary twice: `git -C <dir> branch` to find
//! the current branch and `git -C <dir> diff --quiet` to detect uncommitted
//! changes to tracked files. Probes block and must run on a producer thread.

use crate::domain::{GitStatus, Result, VeneerError};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Directory to branch-and-dirty-flag resolver.
pub trait VcsProbe: Send + Sync {
    /// Probes `dir`, the directory containing `file`.
    ///
    /// # Errors
    ///
    /// Any error means "not a working tree"; callers hide the git field.
    fn probe(&self, dir: &Path, file: &Path) -> Result<GitStatus>;
}

/// [`VcsProbe`] backed by the `git` command line.
#[derive(Debug, Clone)]
pub struct GitCli {
    binary: PathBuf,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitCli {
    /// Uses `binary` as the git executable.
    #[must_use]
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self { binary: binary.into() }
    }

    fn command(&self, dir: &Path, args: &[&str]) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .arg("-C")
            .arg(dir)
            .args(args)
            .env_remove("GIT_DIR")
            .env_remove("GIT_WORK_TREE")
            .stdin(Stdio::null());
        command
    }

    fn run(&self, dir: &Path, args: &[&str]) -> Result<Output> {
        let output = self
            .command(dir, args)
            .output()
            .map_err(|e| VeneerError::Probe(format!("failed to run {} in {}: {e}", self.binary.display(), dir.display())))?;

        if output.status.success() {
            Ok(output)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(VeneerError::Probe(format!("git {args:?} failed: {}", stderr.trim())))
        }
    }

    /// Whether tracked files differ from the index. A failing `diff` counts as
    /// dirty.
    fn is_dirty(&self, dir: &Path) -> bool {
        self.command(dir, &["diff", "--quiet"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_or(true, |status| !status.success())
    }
}

impl VcsProbe for GitCli {
    fn probe(&self, dir: &Path, file: &Path) -> Result<GitStatus> {
        let output = self.run(dir, &["branch"])?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let branch = parse_current_branch(&stdout)
            .ok_or_else(|| VeneerError::Probe(format!("no current branch in {}", dir.display())))?;

        Ok(GitStatus {
            branch,
            dirty: self.is_dirty(dir),
            source_file: file.to_path_buf(),
        })
    }
}

/// Extracts the current branch from `git branch` output.
///
/// The current branch is the line starting with `* `. A detached HEAD is
/// reported as `* (HEAD detached at <ref>)` and yields `<ref>`.
///
/// ```
/// use veneer::worker::probe::parse_current_branch;
///
/// assert_eq!(parse_current_branch("  dev\n* main\n").as_deref(), Some("main"));
/// assert_eq!(parse_current_branch("* (HEAD detached at abc123)\n").as_deref(), Some("abc123"));
/// assert_eq!(parse_current_branch(""), None);
/// ```
#[must_use]
pub fn parse_current_branch(output: &str) -> Option<String> {
    let current = output.lines().find_map(|line| line.strip_prefix("* "))?;
    let branch = current
        .strip_prefix("(HEAD detached at ")
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(current);
    Some(branch.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_other_branches() {
        let output = "  feature/x\n* release-1.2\n  main\n";
        assert_eq!(parse_current_branch(output).as_deref(), Some("release-1.2"));
    }

    #[test]
    fn other_parenthesized_states_are_kept_verbatim() {
        let output = "* (no branch, rebasing main)\n  main\n";
        assert_eq!(
            parse_current_branch(output).as_deref(),
            Some("(no branch, rebasing main)")
        );
    }

    #[test]
    fn missing_binary_is_a_probe_error() {
        let dir = tempfile::tempdir().unwrap();
        let cli = GitCli::new(dir.path().join("no-such-git"));
        let err = cli.probe(dir.path(), &dir.path().join("a.rs")).unwrap_err();
        assert!(matches!(err, VeneerError::Probe(_)));
    }
}
