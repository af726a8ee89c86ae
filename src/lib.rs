//! mergesheet application library
//!
//! Wires the core pipeline to git and to `.xlsx` output. Exposed as a library
//! for the binary and for integration tests.

pub mod adapters;
pub mod cli;
pub mod config;

use anyhow::Result;
use mergesheet_core::app::{ExportOutcome, MergeExportService};
use std::sync::Arc;

use crate::adapters::XlsxSink;
use crate::config::Config;

/// Run the export pipeline described by `config`
pub fn export(config: &Config) -> Result<ExportOutcome> {
    let request = config.export_request()?;
    let service = MergeExportService::new(
        adapters::history_port(config.backend),
        Arc::new(XlsxSink::new()),
    );
    Ok(service.run(&request)?)
}
