use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Malformed log line {line:?}: {reason}")]
    MalformedLogLine { line: String, reason: String },

    #[error("Invalid PR URL template {template:?}: missing {{number}} placeholder")]
    InvalidUrlTemplate { template: String },

    #[error("No PR URL template configured and remote '{remote}' is not a GitHub URL")]
    MissingUrlTemplate { remote: String },

    #[error("Port error: {source}")]
    Port { source: anyhow::Error },
}

pub type Result<T> = std::result::Result<T, CoreError>;
