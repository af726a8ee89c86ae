use anyhow::{Context, Result};
use clap::ValueEnum;
use directories::ProjectDirs;
use mergesheet_core::app::{ExportRequest, TableLayout};
use mergesheet_core::domain::PrUrlTemplate;
use mergesheet_core::ports::{LogQuery, DEFAULT_SUBJECT_PREFIX};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::cli::CliArgs;

/// Default name of the exported workbook
pub const DEFAULT_OUTPUT_FILE: &str = "merge_commit_details.xlsx";

/// Which implementation answers history queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Run the `git` executable
    #[default]
    Cli,
    /// Use libgit2 in-process
    Libgit2,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(default)]
pub struct Config {
    pub version: u32,
    pub repo_path: PathBuf,
    pub output_path: PathBuf,
    pub branch: Option<String>,
    pub url_template: Option<String>,
    pub remote: String,
    pub subject_prefix: String,
    pub sync: bool,
    pub backend: Backend,
    pub sheet: TableLayout,
}

impl Default for Config {
    fn default() -> Self {
        let documents = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            version: 1,
            repo_path: PathBuf::from("."),
            output_path: documents.join(DEFAULT_OUTPUT_FILE),
            branch: None,
            url_template: None,
            remote: "origin".to_string(),
            subject_prefix: DEFAULT_SUBJECT_PREFIX.to_string(),
            sync: true,
            backend: Backend::default(),
            sheet: TableLayout::default(),
        }
    }
}

pub fn get_default_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("", "", "mergesheet")
        .context("Failed to determine project directories")?;

    let config_dir = proj_dirs.config_dir();
    Ok(config_dir.join("mergesheet.toml"))
}

impl Config {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let path = match config_path {
            Some(p) => p,
            None => get_default_config_path()?,
        };

        if !path.exists() {
            let default_config = Config::default();
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .context("Failed to create config directory")?;
            }
            default_config.save(&path)?;
            return Ok(default_config);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config to TOML")?;

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    pub fn from_cli_and_file(cli_args: CliArgs, config_path: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::load(config_path)?;
        config.apply_cli(cli_args);
        Ok(config)
    }

    /// CLI args override config file values
    pub fn apply_cli(&mut self, cli_args: CliArgs) {
        if let Some(repo) = cli_args.repo {
            self.repo_path = repo;
        }
        if let Some(output) = cli_args.output {
            self.output_path = output;
        }
        if let Some(branch) = cli_args.branch {
            self.branch = Some(branch);
        }
        if let Some(template) = cli_args.url_template {
            self.url_template = Some(template);
        }
        if let Some(remote) = cli_args.remote {
            self.remote = remote;
        }
        if let Some(backend) = cli_args.backend {
            self.backend = backend;
        }
        if cli_args.no_sync {
            self.sync = false;
        }
    }

    /// Pipeline input for this configuration
    pub fn export_request(&self) -> Result<ExportRequest> {
        let url_template = self
            .url_template
            .as_deref()
            .map(PrUrlTemplate::new)
            .transpose()
            .context("Invalid url_template")?;

        Ok(ExportRequest {
            repo_path: self.repo_path.clone(),
            output_path: self.output_path.clone(),
            query: LogQuery {
                subject_prefix: self.subject_prefix.clone(),
                branch: self.branch.clone(),
            },
            url_template,
            remote: self.remote.clone(),
            sync: self.sync,
            layout: self.sheet.clone(),
        })
    }
}
