use anyhow::{anyhow, bail, Context, Result};
use git2::{build::CheckoutBuilder, BranchType, Repository as GitRepository, Sort};
use mergesheet_core::ports::{HistoryPort, LogQuery};
use std::path::Path;
use tracing::{debug, info};

/// History adapter that reads the repository in-process through libgit2
#[derive(Debug, Default)]
pub struct LibGitAdapter;

impl LibGitAdapter {
    pub fn new() -> Self {
        Self
    }

    fn open_repo(&self, path: &Path) -> Result<GitRepository> {
        GitRepository::discover(path)
            .with_context(|| format!("Failed to open git repository at {}", path.display()))
    }
}

impl HistoryPort for LibGitAdapter {
    fn is_repository(&self, path: &Path) -> bool {
        GitRepository::discover(path).is_ok()
    }

    /// Fetch the upstream of the current branch and fast-forward to it
    fn sync(&self, path: &Path) -> Result<()> {
        let git_repo = self.open_repo(path)?;

        let head = git_repo.head().context("Failed to read HEAD")?;
        if !head.is_branch() {
            bail!("HEAD is detached in {}; nothing to pull", path.display());
        }
        let head_name = head
            .name()
            .ok_or_else(|| anyhow!("HEAD reference name is not valid UTF-8"))?
            .to_string();
        let branch_name = head
            .shorthand()
            .ok_or_else(|| anyhow!("Branch name is not valid UTF-8"))?
            .to_string();

        let branch = git_repo.find_branch(&branch_name, BranchType::Local)?;
        let upstream = branch
            .upstream()
            .with_context(|| format!("Branch '{}' has no upstream", branch_name))?;
        let upstream_name = upstream
            .get()
            .name()
            .ok_or_else(|| anyhow!("Upstream name is not valid UTF-8"))?
            .to_string();

        let remote_name = git_repo.branch_remote_name(&upstream_name)?;
        let remote_name = remote_name
            .as_str()
            .ok_or_else(|| anyhow!("Remote name is not valid UTF-8"))?;

        info!("Fetching {} for {}", remote_name, branch_name);
        let mut remote = git_repo
            .find_remote(remote_name)
            .with_context(|| format!("Remote '{}' not found", remote_name))?;
        remote
            .fetch(&[] as &[&str], None, None)
            .context("Failed to fetch from remote")?;

        let upstream_ref = git_repo.find_reference(&upstream_name)?;
        let target = git_repo.reference_to_annotated_commit(&upstream_ref)?;
        let (analysis, _) = git_repo.merge_analysis(&[&target])?;

        if analysis.is_up_to_date() {
            debug!("{} is up to date", branch_name);
            return Ok(());
        }
        if !analysis.is_fast_forward() {
            bail!(
                "Branch '{}' has diverged from {}; cannot fast-forward",
                branch_name,
                upstream_name
            );
        }

        // Update the working tree first; a safe checkout refuses to clobber
        // local edits, and HEAD only moves once the files are in place.
        let target_commit = git_repo.find_commit(target.id())?;
        git_repo
            .checkout_tree(target_commit.as_object(), Some(CheckoutBuilder::new().safe()))
            .with_context(|| {
                format!(
                    "Local changes in {} would be overwritten by fast-forward to {}",
                    path.display(),
                    upstream_name
                )
            })?;

        let mut head_ref = git_repo.find_reference(&head_name)?;
        head_ref.set_target(target.id(), &format!("mergesheet: fast-forward to {}", upstream_name))?;

        info!("Fast-forwarded {} to {}", branch_name, target.id());
        Ok(())
    }

    fn merge_log(&self, path: &Path, query: &LogQuery) -> Result<Vec<String>> {
        let git_repo = self.open_repo(path)?;

        let mut revwalk = git_repo.revwalk()?;
        match &query.branch {
            Some(branch) => {
                let oid = git_repo
                    .revparse_single(branch)
                    .with_context(|| format!("Unknown revision '{}'", branch))?
                    .peel_to_commit()?
                    .id();
                revwalk.push(oid)?;
            }
            None => revwalk.push_head()?,
        }
        revwalk.set_sorting(Sort::TIME)?;

        let mut lines = Vec::new();
        for oid in revwalk {
            let commit = git_repo.find_commit(oid?)?;
            if commit.parent_count() < 2 {
                continue;
            }

            let subject = commit.summary().unwrap_or("");
            if !subject.starts_with(&query.subject_prefix) {
                continue;
            }

            lines.push(format!("{}|{}|{}", commit.id(), commit.time().seconds(), subject));
        }

        Ok(lines)
    }

    fn remote_url(&self, path: &Path, remote: &str) -> Result<Option<String>> {
        let git_repo = self.open_repo(path)?;
        let url = match git_repo.find_remote(remote) {
            Ok(found) => found.url().map(str::to_string),
            Err(_) => None,
        };
        Ok(url)
    }
}
