use crate::error::{CoreError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder substituted with the PR number when rendering a link
pub const NUMBER_PLACEHOLDER: &str = "{number}";

/// One pull-request merge commit, parsed from a log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRecord {
    pub merged_at: DateTime<Utc>,
    pub pr_number: Option<u64>,
    pub pr_link: Option<String>,
    pub commit_hash: String,
}

/// Template for building a pull-request URL from its number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrUrlTemplate(String);

impl PrUrlTemplate {
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if !template.contains(NUMBER_PLACEHOLDER) {
            return Err(CoreError::InvalidUrlTemplate { template });
        }
        Ok(Self(template))
    }

    /// Derive the pull-request URL template of a GitHub remote.
    ///
    /// Accepts HTTPS, scp-like (`git@github.com:owner/repo.git`) and
    /// `ssh://` remotes. Returns `None` for anything that is not GitHub.
    pub fn from_remote_url(url: &str) -> Option<Self> {
        let url = url.trim();
        let path = url
            .strip_prefix("https://github.com/")
            .or_else(|| url.strip_prefix("http://github.com/"))
            .or_else(|| url.strip_prefix("git@github.com:"))
            .or_else(|| url.strip_prefix("ssh://git@github.com/"))?;

        let path = path.trim_end_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);

        let mut parts = path.split('/');
        let owner = parts.next().filter(|s| !s.is_empty())?;
        let repo = parts.next().filter(|s| !s.is_empty())?;
        if parts.next().is_some() {
            return None;
        }

        Some(Self(format!(
            "https://github.com/{owner}/{repo}/pull/{NUMBER_PLACEHOLDER}"
        )))
    }

    pub fn render(&self, number: u64) -> String {
        self.0.replace(NUMBER_PLACEHOLDER, &number.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PrUrlTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
