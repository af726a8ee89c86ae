use anyhow::{bail, Context, Result};
use mergesheet_core::ports::{HistoryPort, LogQuery, LOG_FORMAT};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

use super::line_subject;

/// History adapter that runs the `git` executable
pub struct GitCliAdapter {
    program: PathBuf,
}

impl GitCliAdapter {
    pub fn new() -> Self {
        Self::with_program("git")
    }

    pub fn with_program<P: Into<PathBuf>>(program: P) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, path: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.current_dir(path);
        cmd
    }

    /// Run git in `path` and return its stdout, failing on a non-zero exit
    fn run(&self, path: &Path, args: &[String]) -> Result<String> {
        debug!("Running git {} in {}", args.join(" "), path.display());

        let output = self
            .command(path)
            .args(args)
            .output()
            .with_context(|| format!("Failed to run {}", self.program.display()))?;

        if !output.status.success() {
            bail!(
                "git {} failed in {} ({}): {}",
                args.join(" "),
                path.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Arguments of the merge history query.
    ///
    /// A branch starting with `-` would be read as an option, so it is rejected.
    pub fn log_args(query: &LogQuery) -> Result<Vec<String>> {
        let mut args = vec![
            "log".to_string(),
            "--merges".to_string(),
            format!("--pretty=tformat:{LOG_FORMAT}"),
            "--fixed-strings".to_string(),
            format!("--grep={}", query.subject_prefix),
        ];
        if let Some(branch) = &query.branch {
            if branch.starts_with('-') {
                bail!("Invalid branch name '{}'", branch);
            }
            args.push(branch.clone());
        }
        args.push("--".to_string());
        Ok(args)
    }
}

impl Default for GitCliAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryPort for GitCliAdapter {
    fn is_repository(&self, path: &Path) -> bool {
        self.command(path)
            .arg("rev-parse")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|s| s.success())
    }

    fn sync(&self, path: &Path) -> Result<()> {
        let output = self.run(path, &["pull".to_string()])?;
        debug!("git pull: {}", output.trim());
        Ok(())
    }

    fn merge_log(&self, path: &Path, query: &LogQuery) -> Result<Vec<String>> {
        let stdout = self.run(path, &Self::log_args(query)?)?;

        // --grep matches any line of the message; keep only subjects with the prefix
        let lines = stdout
            .lines()
            .filter(|line| !line.is_empty())
            .filter(|line| line_subject(line).is_none_or(|s| s.starts_with(&query.subject_prefix)))
            .map(str::to_string)
            .collect();

        Ok(lines)
    }

    fn remote_url(&self, path: &Path, remote: &str) -> Result<Option<String>> {
        let output = self
            .command(path)
            .args(["remote", "get-url", remote])
            .output()
            .with_context(|| format!("Failed to run {}", self.program.display()))?;

        if !output.status.success() {
            debug!("Remote '{}' not found in {}", remote, path.display());
            return Ok(None);
        }

        let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Some(url).filter(|u| !u.is_empty()))
    }
}
