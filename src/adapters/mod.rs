//! Adapters implementing the core ports

pub mod git_cli;
pub mod libgit;
pub mod xlsx;

use crate::config::Backend;
use mergesheet_core::ports::HistoryPort;
use std::sync::Arc;

pub use git_cli::GitCliAdapter;
pub use libgit::LibGitAdapter;
pub use xlsx::XlsxSink;

/// History adapter for the configured backend
pub fn history_port(backend: Backend) -> Arc<dyn HistoryPort> {
    match backend {
        Backend::Cli => Arc::new(GitCliAdapter::new()),
        Backend::Libgit2 => Arc::new(LibGitAdapter::new()),
    }
}

/// Subject part of a `hash|timestamp|subject` line
pub(crate) fn line_subject(line: &str) -> Option<&str> {
    line.splitn(3, '|').nth(2)
}
