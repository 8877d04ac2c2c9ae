use crate::render::{OutputFormat, TerminalRenderer, write_json_report};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use vellum_application::AnalysisUseCase;
use vellum_core::config::VellumConfig;
use vellum_core::session::{AnalysisSession, SessionStatus};
use vellum_infrastructure::load_document;
use vellum_interaction::HttpSubmissionDispatcher;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// PDF document to analyze
    pub path: PathBuf,

    /// Analysis endpoint (overrides config and VELLUM_ENDPOINT)
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Sections)]
    pub format: OutputFormat,
}

pub async fn run(args: AnalyzeArgs, config: VellumConfig) -> Result<ExitCode> {
    let mut service = config.service;
    if let Some(endpoint) = args.endpoint {
        service.endpoint = endpoint;
    }

    let document = load_document(&args.path)
        .with_context(|| format!("Cannot analyze {}", args.path.display()))?;

    let dispatcher = HttpSubmissionDispatcher::from_config(&service)?;
    let usecase = AnalysisUseCase::new(Arc::new(dispatcher));

    let mut session = AnalysisSession::new();
    session.select_document(document)?;

    let mut renderer = TerminalRenderer::new(io::stdout(), args.format);
    let status = usecase.analyze(&mut session, &mut renderer).await?;

    if let Some(err) = renderer.take_write_error() {
        return Err(err).context("Failed to write analysis output");
    }

    if args.format == OutputFormat::Json {
        write_json_report(io::stdout().lock(), &session)?;
    }

    match status {
        SessionStatus::Completed => Ok(ExitCode::SUCCESS),
        _ => {
            if args.format != OutputFormat::Json {
                eprintln!(
                    "{}",
                    "Run with -v or see the log file for details.".dimmed()
                );
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
