use crate::app::export::{build_table, TableLayout};
use crate::app::parse::parse_log;
use crate::domain::record::PrUrlTemplate;
use crate::error::{CoreError, Result};
use crate::ports::{HistoryPort, LogQuery, SheetSink};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Everything the export pipeline needs for one run
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub repo_path: PathBuf,
    pub output_path: PathBuf,
    pub query: LogQuery,
    /// Explicit link template; derived from `remote` when unset
    pub url_template: Option<PrUrlTemplate>,
    pub remote: String,
    /// Pull before reading history
    pub sync: bool,
    pub layout: TableLayout,
}

/// Result of a pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The source path is not a git working copy; nothing was written
    NotARepository { path: PathBuf },
    Exported { path: PathBuf, rows: usize },
}

/// Runs sync → extract → parse → export against the configured ports
pub struct MergeExportService {
    history: Arc<dyn HistoryPort>,
    sink: Arc<dyn SheetSink>,
}

fn port_error(source: anyhow::Error) -> CoreError {
    CoreError::Port { source }
}

impl MergeExportService {
    pub fn new(history: Arc<dyn HistoryPort>, sink: Arc<dyn SheetSink>) -> Self {
        Self { history, sink }
    }

    /// Pull the working copy at `path` when `pull` is set. Sync failures
    /// are errors.
    pub fn sync_repository(&self, path: &Path, pull: bool) -> Result<()> {
        if pull {
            info!("Pulling latest changes in {}", path.display());
            self.history.sync(path).map_err(port_error)?;
        } else {
            debug!("Sync disabled, using local history of {}", path.display());
        }
        Ok(())
    }

    /// The configured template, or one derived from the remote URL
    pub fn resolve_template(&self, request: &ExportRequest) -> Result<PrUrlTemplate> {
        if let Some(template) = &request.url_template {
            return Ok(template.clone());
        }

        let url = self
            .history
            .remote_url(&request.repo_path, &request.remote)
            .map_err(port_error)?;
        let template = url.as_deref().and_then(PrUrlTemplate::from_remote_url);

        match template {
            Some(template) => {
                info!("Using PR links from remote '{}': {}", request.remote, template);
                Ok(template)
            }
            None => Err(CoreError::MissingUrlTemplate {
                remote: request.remote.clone(),
            }),
        }
    }

    pub fn run(&self, request: &ExportRequest) -> Result<ExportOutcome> {
        if !self.history.is_repository(&request.repo_path) {
            warn!("{} is not a git repository", request.repo_path.display());
            return Ok(ExportOutcome::NotARepository {
                path: request.repo_path.clone(),
            });
        }

        // Resolved before pulling so a bad template leaves the working copy untouched
        let template = self.resolve_template(request)?;
        self.sync_repository(&request.repo_path, request.sync)?;

        let lines = self
            .history
            .merge_log(&request.repo_path, &request.query)
            .map_err(port_error)?;
        info!("Found {} pull-request merge commits", lines.len());

        let records = parse_log(&lines, &template)?;
        let table = build_table(&records, &request.layout);

        self.sink
            .write_table(&table, &request.output_path)
            .map_err(port_error)?;
        info!("Wrote {} rows to {}", table.row_count(), request.output_path.display());

        Ok(ExportOutcome::Exported {
            path: request.output_path.clone(),
            rows: table.row_count(),
        })
    }
}
