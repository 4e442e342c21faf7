//! # jsift CLI entry point
//!
//! Parses command-line arguments, initializes tracing, and drives one
//! validation batch run. Fatal errors (schema load failures, input
//! precondition violations) exit with code 1 before any report is
//! written; a completed batch always writes the report and exits 0.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use jsift_cli::run::{run, RunConfig};
use jsift_pipeline::CandidateSource;

/// Validate a batch of JSON messages against a JSON Schema registry.
///
/// Candidates come from `JSON: ` markers in a log file, or — with
/// `--file-mode` — from a directory where each file holds one payload.
/// Each message picks its schema by `header.message_type`; the run ends
/// with a structured report of successes, failures, and exceptions.
#[derive(Parser, Debug)]
#[command(name = "jsift", version, about, long_about = None)]
struct Cli {
    /// Validate a directory of JSON files instead of a single log file.
    #[arg(short = 'f', long)]
    file_mode: bool,

    /// Print the full report, including failure detail, instead of just
    /// the aggregate counters.
    #[arg(short, long)]
    verbose: bool,

    /// Directory of JSON Schema documents, one `<message_type>.json` each.
    #[arg(long)]
    schemas: PathBuf,

    /// Log file to scan for `JSON: ` payloads (single-log mode).
    #[arg(long)]
    log: Option<PathBuf>,

    /// Directory of JSON files, one candidate per file (`--file-mode`).
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Where to write the report.
    #[arg(long, default_value = "jsift.out")]
    out: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    match build_config(cli).and_then(|config| run(&config)) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

/// Assemble the run configuration from parsed flags.
fn build_config(cli: Cli) -> Result<RunConfig> {
    let source = if cli.file_mode {
        let dir = cli
            .input_dir
            .context("--file-mode requires --input-dir <DIR>")?;
        CandidateSource::Directory(dir)
    } else {
        let log = cli.log.context("single-log mode requires --log <FILE>")?;
        CandidateSource::LogFile(log)
    };
    Ok(RunConfig {
        schema_dir: cli.schemas,
        source,
        report_path: cli.out,
        verbose: cli.verbose,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_log_mode_defaults() {
        let cli = Cli::try_parse_from(["jsift", "--schemas", "schemas", "--log", "app.log"])
            .unwrap();
        assert!(!cli.file_mode);
        assert!(!cli.verbose);
        assert_eq!(cli.schemas, PathBuf::from("schemas"));
        assert_eq!(cli.log, Some(PathBuf::from("app.log")));
        assert_eq!(cli.out, PathBuf::from("jsift.out"));
    }

    #[test]
    fn cli_parse_file_mode_with_short_flags() {
        let cli = Cli::try_parse_from([
            "jsift",
            "-f",
            "-v",
            "--schemas",
            "schemas",
            "--input-dir",
            "messages",
            "--out",
            "report.json",
        ])
        .unwrap();
        assert!(cli.file_mode);
        assert!(cli.verbose);
        assert_eq!(cli.input_dir, Some(PathBuf::from("messages")));
        assert_eq!(cli.out, PathBuf::from("report.json"));
    }

    #[test]
    fn cli_parse_requires_schemas() {
        let result = Cli::try_parse_from(["jsift", "--log", "app.log"]);
        assert!(result.is_err());
    }

    #[test]
    fn build_config_log_mode_uses_log_file_source() {
        let cli = Cli::try_parse_from(["jsift", "--schemas", "s", "--log", "a.log"]).unwrap();
        let config = build_config(cli).unwrap();
        assert!(matches!(config.source, CandidateSource::LogFile(_)));
    }

    #[test]
    fn build_config_file_mode_uses_directory_source() {
        let cli =
            Cli::try_parse_from(["jsift", "-f", "--schemas", "s", "--input-dir", "d"]).unwrap();
        let config = build_config(cli).unwrap();
        assert!(matches!(config.source, CandidateSource::Directory(_)));
    }

    #[test]
    fn build_config_log_mode_without_log_is_an_error() {
        let cli = Cli::try_parse_from(["jsift", "--schemas", "s"]).unwrap();
        let err = build_config(cli).unwrap_err();
        assert!(err.to_string().contains("--log"), "{err}");
    }

    #[test]
    fn build_config_file_mode_without_input_dir_is_an_error() {
        let cli = Cli::try_parse_from(["jsift", "-f", "--schemas", "s"]).unwrap();
        let err = build_config(cli).unwrap_err();
        assert!(err.to_string().contains("--input-dir"), "{err}");
    }

    #[test]
    fn build_config_ignores_unused_source_for_the_other_mode() {
        // --log may be present alongside -f; directory mode wins.
        let cli = Cli::try_parse_from([
            "jsift",
            "-f",
            "--schemas",
            "s",
            "--input-dir",
            "d",
            "--log",
            "a.log",
        ])
        .unwrap();
        let config = build_config(cli).unwrap();
        assert!(matches!(config.source, CandidateSource::Directory(_)));
    }
}
