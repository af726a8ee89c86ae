use crate::config::Backend;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, PartialEq)]
#[command(name = "mergesheet")]
#[command(about = "Export the pull-request merge commits of a git repository to an Excel table")]
pub struct CliArgs {
    /// Git working copy to read (overrides config)
    #[arg(long)]
    pub repo: Option<PathBuf>,

    /// Spreadsheet file to write (overrides config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Read merges reachable from this branch instead of HEAD
    #[arg(long)]
    pub branch: Option<String>,

    /// PR link template containing {number}, e.g. https://github.com/owner/repo/pull/{number}
    #[arg(long)]
    pub url_template: Option<String>,

    /// Remote used to derive PR links when no template is set
    #[arg(long)]
    pub remote: Option<String>,

    /// How to talk to git
    #[arg(long, value_enum)]
    pub backend: Option<Backend>,

    /// Do not pull before reading history
    #[arg(long)]
    pub no_sync: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}
