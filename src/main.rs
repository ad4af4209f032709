// src/main.rs

use anyhow::Context;
use clap::Parser;
use invoice_export::{execute_export, AppError, CommandLineInput, ExportConfig, ExportReport};
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::path::Path;
use std::process::ExitCode;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file_path = std::env::temp_dir().join("invoice_export.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Loads `path` into the process environment, or `.env` when no path is given.
///
/// A missing default `.env` is fine; a missing explicit file is not.
fn load_env_file(path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("Could not load env file {}", path.display()))?;
            log::debug!("Loaded environment from {}", path.display());
        }
        None => match dotenvy::dotenv() {
            Ok(path) => log::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e).context("Could not load .env"),
        },
    }
    Ok(())
}

fn report_completion(report: &ExportReport) {
    println!(
        "✓ Finished export: {} ({} invoices)",
        report.path.display(),
        report.rows_written
    );

    if !report.is_complete() {
        eprintln!(
            "⚠️  {} invoice(s) were skipped. See the log for details.",
            report.skipped.len()
        );
    }
}

async fn run(cli: CommandLineInput) -> anyhow::Result<()> {
    load_env_file(cli.env_file.as_deref())?;

    let config = ExportConfig::resolve(cli).context("Invalid configuration")?;
    let report = execute_export(&config)
        .await
        .context("Invoice export failed")?;

    report_completion(&report);
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = CommandLineInput::parse();

    if let Err(e) = setup_logging(cli.verbose) {
        eprintln!("Could not initialize logging: {:#}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            if e.downcast_ref::<AppError>().is_some_and(AppError::is_remote) {
                eprintln!("The Invoice Simple service did not cooperate; nothing was written.");
            }
            ExitCode::FAILURE
        }
    }
}
