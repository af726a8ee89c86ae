use anyhow::Result;
use std::path::Path;

/// Line format requested from the log query: hash, committer epoch seconds, subject
pub const LOG_FORMAT: &str = "%H|%ct|%s";

/// Subject prefix the hosting platform uses for pull-request merges
pub const DEFAULT_SUBJECT_PREFIX: &str = "Merge pull request";

/// Request for the merge history of a working copy
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogQuery {
    /// Keep merge commits whose subject starts with this prefix
    pub subject_prefix: String,
    /// Revision to walk from; `HEAD` when unset
    pub branch: Option<String>,
}

impl Default for LogQuery {
    fn default() -> Self {
        Self {
            subject_prefix: DEFAULT_SUBJECT_PREFIX.to_string(),
            branch: None,
        }
    }
}

/// Port for version-control history operations
pub trait HistoryPort: Send + Sync {
    /// Whether `path` is inside a git working copy
    fn is_repository(&self, path: &Path) -> bool;

    /// Bring the working copy up to date with its remote
    fn sync(&self, path: &Path) -> Result<()>;

    /// Merge commits matching `query`, one `LOG_FORMAT` line each, most recent first
    fn merge_log(&self, path: &Path, query: &LogQuery) -> Result<Vec<String>>;

    /// URL of the named remote, if it exists
    fn remote_url(&self, path: &Path, remote: &str) -> Result<Option<String>>;
}
