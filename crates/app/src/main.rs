//! Porter - Postman workspace exporter
//!
//! Downloads every collection of every workspace visible to the
//! configured API key and writes each one to a JSON file.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::builder::BoolishValueParser;
use porter_application::{
    ApplicationResult, ExportOptions, ExportReport, ExportWorkspaces, PostmanApi,
};
use porter_infrastructure::{
    FileSystemExportRepository, ReqwestRequestSender, TokioFileSystem, load_postman_config,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Export Postman collections to local JSON files.
///
/// Reads `postman_api_url` and `postman_api_key` from the environment
/// or a `.env` file.
#[derive(Debug, Parser)]
#[command(name = "porter", version, about)]
struct Cli {
    /// Directory the exported files are written to
    #[arg(long, env = "export_output_dir", default_value = ".")]
    output_dir: PathBuf,

    /// Also export each workspace's environments
    #[arg(long, env = "export_environments", value_parser = BoolishValueParser::new())]
    environments: bool,

    /// Also export each workspace's global variables
    #[arg(long, env = "export_globals", value_parser = BoolishValueParser::new())]
    globals: bool,

    /// Leave files that already exist untouched
    #[arg(long, env = "skip_already_exported", value_parser = BoolishValueParser::new())]
    skip_existing: bool,

    /// Log failed items and keep going instead of stopping
    #[arg(long, env = "continue_on_error", value_parser = BoolishValueParser::new())]
    continue_on_error: bool,
}

impl Cli {
    const fn export_options(&self) -> ExportOptions {
        ExportOptions {
            include_environments: self.environments,
            include_globals: self.globals,
            skip_existing: self.skip_existing,
            continue_on_error: self.continue_on_error,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(&cli).await {
        Ok(report) => {
            info!(
                exported = report.exported.len(),
                skipped = report.skipped.len(),
                failures = report.failures,
                duplicates = report.duplicates.len(),
                "Export finished"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Export failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_ansi(std::io::stdout().is_terminal()))
        .init();
}

async fn run(cli: &Cli) -> ApplicationResult<ExportReport> {
    let config = load_postman_config()?;
    info!(api_url = config.api_url(), "Exporting Postman workspaces");

    let sender = ReqwestRequestSender::new()?;
    let api = PostmanApi::new(sender, config);
    let repository = FileSystemExportRepository::new(TokioFileSystem::new(), &cli.output_dir);

    ExportWorkspaces::new(api, repository, cli.export_options())
        .execute()
        .await
}
