//! dupmatch - find byte-identical files shared between directories
//!
//! The library compares directory listings by size, then by BLAKE3 content
//! hash, reading each file at most once. Two entry points share the core:
//!
//! - [`run_pair`]: every duplicate pair between two directories
//! - [`run_many`]: the files present in all of three or more directories

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod scanner;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::duplicates::{DuplicateMatcher, MatchReport, MultiMatchReport};
use crate::error::ExitCode;
use crate::output::{JsonOutput, TextOutput};

/// Run the application with parsed command-line arguments.
///
/// Initializes logging, resolves configuration, then dispatches on the
/// number of directories.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let mut config = load_config(&cli)?;
    config.merge_cli(&cli);
    log::debug!("Effective configuration: {:?}", config);
    if cli.save_config {
        save_config(&cli, &config)?;
    }

    let matcher = DuplicateMatcher::new(config.matcher_config());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.directories.len() == 2 {
        run_pair(&matcher, &cli.directories, config.output, &mut out)
    } else {
        run_many(&matcher, &cli.directories, config.output, &mut out)
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let profile = cli.profile.as_deref();
    match &cli.config {
        Some(path) => {
            // A file that does not exist yet is fine when it is about to be written.
            if !path.is_file() && !cli.save_config {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Ok(Config::load_from_path(path.clone(), profile))
        }
        None => Ok(Config::load(profile)),
    }
}

fn save_config(cli: &Cli, config: &Config) -> Result<()> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::config_path()?,
    };
    config
        .save_to_path(&path)
        .with_context(|| format!("Failed to save config to {}", path.display()))?;
    log::info!("Saved configuration to {}", path.display());
    Ok(())
}

/// Match two directories and write every duplicate pair.
pub fn run_pair<W: Write>(
    matcher: &DuplicateMatcher,
    directories: &[PathBuf],
    format: OutputFormat,
    writer: &mut W,
) -> Result<ExitCode> {
    let [source, target] = directories else {
        anyhow::bail!(
            "Expected exactly two directories, got {}",
            directories.len()
        );
    };

    let report: MatchReport = matcher.match_pair(source, target);
    match format {
        OutputFormat::Text => {
            TextOutput::new(&report.pairs)
                .write_to(writer)
                .context("Failed to write output")?;
            report_failure(report.failure.as_ref());
        }
        OutputFormat::Json => {
            JsonOutput::from_pair_report(directories, &report)
                .write_to(writer, true)
                .context("Failed to write JSON output")?;
        }
    }
    Ok(ExitCode::from_success(report.is_success()))
}

/// Match three or more directories and write the pairs of every surviving file.
pub fn run_many<W: Write>(
    matcher: &DuplicateMatcher,
    directories: &[PathBuf],
    format: OutputFormat,
    writer: &mut W,
) -> Result<ExitCode> {
    let report: MultiMatchReport = matcher.match_many(directories);
    match format {
        OutputFormat::Text => {
            TextOutput::new(&report.pairs())
                .write_to(writer)
                .context("Failed to write output")?;
            report_failure(report.failure.as_ref());
        }
        OutputFormat::Json => {
            JsonOutput::from_multi_report(directories, &report)
                .write_to(writer, true)
                .context("Failed to write JSON output")?;
        }
    }
    Ok(ExitCode::from_success(report.is_success()))
}

fn report_failure(failure: Option<&duplicates::MatchFailure>) {
    if let Some(failure) = failure {
        eprintln!("[{}] {}", ExitCode::MatchFailed.code_prefix(), failure);
    }
}
