use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use vellum_core::config::LoggingConfig;
use vellum_infrastructure::ConfigService;

mod commands;
mod logging;
mod render;

use commands::analyze::AnalyzeArgs;

#[derive(Parser)]
#[command(name = "vellum", version)]
#[command(about = "Vellum - upload a document and read its analysis as it streams in", long_about = None)]
struct Cli {
    /// Log to stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use this config file instead of the default location
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a PDF to the analysis service and print the report
    Analyze(AnalyzeArgs),
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Print the config file location
    Path,
    /// Print the effective configuration (file + environment)
    Show,
    /// Write a default config file if none exists
    Init,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config_service = match cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new()?,
    };

    match cli.command {
        Commands::Analyze(args) => {
            let config = config_service.load_effective()?;
            let _guard = logging::init(cli.verbose, &config.logging);
            commands::analyze::run(args, config).await
        }
        Commands::Config { action } => {
            let logging = LoggingConfig {
                file: false,
                ..LoggingConfig::default()
            };
            let _guard = logging::init(cli.verbose, &logging);
            commands::config::run(action, &config_service, &mut std::io::stdout().lock())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
