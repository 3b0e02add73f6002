//! The git probe against real repositories. Skipped when `git` is missing.

use std::path::Path;
use std::process::Command;
use std::sync::Arc;
use std::time::{Duration, Instant};
use veneer::app::{EditorCommand, RenderEngine};
use veneer::domain::UpdateEvent;
use veneer::ui::toolkit::{RecordingToolkit, Widget};
use veneer::worker::{GitCli, VcsProbe};
use veneer::{Config, Theme};

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .env_remove("GIT_DIR")
        .env_remove("GIT_WORK_TREE")
        .status()
        .unwrap();
    assert!(status.success(), "git {args:?} failed");
}

fn git_available() -> bool {
    Command::new("git").arg("--version").output().is_ok_and(|o| o.status.success())
}

/// A repository on `main` with one committed file.
fn repo() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path();
    git(path, &["init", "-q"]);
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    git(path, &["config", "user.email", "dev@example.com"]);
    git(path, &["config", "user.name", "Dev"]);
    git(path, &["config", "commit.gpgsign", "false"]);
    std::fs::write(path.join("a.txt"), "one\n").unwrap();
    git(path, &["add", "a.txt"]);
    git(path, &["commit", "-q", "-m", "init"]);
    dir
}

#[test]
fn dirty_branch_gets_a_star() {
    if !git_available() {
        return;
    }
    let repo = repo();
    let file = repo.path().join("a.txt");
    std::fs::write(&file, "two\n").unwrap();

    let status = GitCli::default().probe(repo.path(), &file).unwrap();
    assert_eq!(status.branch, "main");
    assert!(status.dirty);
    assert_eq!(status.label(), "main*");
}

#[test]
fn clean_detached_head_shows_the_ref() {
    if !git_available() {
        return;
    }
    let repo = repo();
    git(repo.path(), &["tag", "abc123"]);
    git(repo.path(), &["checkout", "-q", "abc123"]);

    let status = GitCli::default().probe(repo.path(), &repo.path().join("a.txt")).unwrap();
    assert_eq!(status.branch, "abc123");
    assert!(!status.dirty);
    assert_eq!(status.label(), "abc123");
}

#[test]
fn directory_outside_a_repository_fails() {
    if !git_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    assert!(GitCli::default().probe(dir.path(), &dir.path().join("x")).is_err());
}

#[test]
fn statusline_follows_the_buffer_into_a_repository() {
    if !git_available() {
        return;
    }
    let repo = repo();
    let mut engine: RenderEngine<RecordingToolkit, Vec<EditorCommand>> =
        RenderEngine::new(&Config::default(), &Theme::default(), RecordingToolkit::default(), Vec::new())
            .with_probe(Arc::new(GitCli::default()));
    engine.init();

    engine
        .sender()
        .send(UpdateEvent::BufEnter {
            path: repo.path().join("a.txt").to_string_lossy().into_owned(),
            filetype: "text".to_string(),
            encoding: "utf-8".to_string(),
        })
        .unwrap();

    let deadline = Instant::now() + Duration::from_secs(10);
    while !engine.toolkit().is_visible(Widget::GitGroup) {
        assert!(Instant::now() < deadline, "git field never appeared");
        engine.await_and_drain_all();
    }
    assert_eq!(engine.toolkit().text(Widget::GitLabel), Some("main"));
}
