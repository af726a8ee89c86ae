//! Fixture repositories with real merge commits, built with git2
#![allow(dead_code)]

use anyhow::Result;
use git2::{Oid, Repository, Signature, Time};
use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

pub const TEMPLATE: &str = "https://github.com/acme/widgets/pull/{number}";

pub fn signature(seconds: i64) -> Result<Signature<'static>> {
    Ok(Signature::new(
        "Test User",
        "test@example.com",
        &Time::new(seconds, 0),
    )?)
}

/// New repository with a single root commit
pub fn create_test_git_repo(path: &Path) -> Result<Repository> {
    fs::create_dir_all(path)?;
    let git_repo = Repository::init(path)?;
    let sig = signature(1_699_000_000)?;

    let tree_id = {
        let mut index = git_repo.index()?;
        index.write_tree()?
    };
    {
        let tree = git_repo.find_tree(tree_id)?;
        git_repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])?;
    }

    Ok(git_repo)
}

/// Plain single-parent commit on HEAD
pub fn commit_on_head(git_repo: &Repository, message: &str, seconds: i64) -> Result<Oid> {
    let head = git_repo.head()?.peel_to_commit()?;
    let tree = head.tree()?;
    let sig = signature(seconds)?;
    Ok(git_repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &[&head])?)
}

/// Write `contents` to `name` in the working tree and commit it on HEAD
pub fn commit_file(
    git_repo: &Repository,
    name: &str,
    contents: &str,
    message: &str,
    seconds: i64,
) -> Result<Oid> {
    let workdir = git_repo
        .workdir()
        .ok_or_else(|| anyhow::anyhow!("Repository has no working tree"))?;
    fs::write(workdir.join(name), contents)?;

    let mut index = git_repo.index()?;
    index.add_path(Path::new(name))?;
    index.write()?;
    let tree = git_repo.find_tree(index.write_tree()?)?;

    let head = git_repo.head()?.peel_to_commit()?;
    let sig = signature(seconds)?;
    Ok(git_repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &[&head])?)
}

/// Make a side commit and merge it into HEAD with the given subject
pub fn merge_into_head(git_repo: &Repository, subject: &str, seconds: i64) -> Result<Oid> {
    let head = git_repo.head()?.peel_to_commit()?;
    let tree = head.tree()?;

    let side_sig = signature(seconds - 60)?;
    let side_id = git_repo.commit(None, &side_sig, &side_sig, "Feature work", &tree, &[&head])?;
    let side = git_repo.find_commit(side_id)?;

    let sig = signature(seconds)?;
    let message = format!("{subject}\n\nReviewed changes");
    Ok(git_repo.commit(Some("HEAD"), &sig, &sig, &message, &tree, &[&head, &side])?)
}

/// Repository with two PR merges, one branch merge and one plain commit
pub fn create_merge_history(path: &Path) -> Result<Repository> {
    let git_repo = create_test_git_repo(path)?;
    merge_into_head(&git_repo, "Merge pull request #41 from acme/first", 1_700_000_000)?;
    merge_into_head(&git_repo, "Merge branch 'main' into feature", 1_700_000_100)?;
    commit_on_head(&git_repo, "Fix typo in README", 1_700_000_200)?;
    merge_into_head(&git_repo, "Merge pull request #42 from acme/second", 1_700_000_300)?;
    Ok(git_repo)
}

pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

/// Subject field of a `hash|timestamp|subject` line
pub fn subject(line: &str) -> &str {
    line.splitn(3, '|').nth(2).unwrap_or("")
}
