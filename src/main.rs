use anyhow::Result;
use clap::Parser;
use mergesheet::cli::CliArgs;
use mergesheet::config::Config;
use mergesheet_core::app::ExportOutcome;
use tracing::info;

fn main() -> Result<()> {
    // Initialize tracing with env filter
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli_args = CliArgs::parse();
    let config_path = cli_args.config.clone();
    let config = Config::from_cli_and_file(cli_args, config_path)?;

    info!(
        "Exporting merges from {} using the {:?} backend",
        config.repo_path.display(),
        config.backend
    );

    match mergesheet::export(&config)? {
        ExportOutcome::NotARepository { path } => {
            eprintln!(
                "Error: The specified path '{}' is not a Git repository.",
                path.display()
            );
        }
        ExportOutcome::Exported { path, rows } => {
            info!("Exported {} merge commits", rows);
            println!("Merge commit details exported to Excel: {}", path.display());
        }
    }

    Ok(())
}
