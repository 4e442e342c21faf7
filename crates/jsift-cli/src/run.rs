//! # Batch Run Orchestration
//!
//! Executes one validation batch end to end: load the registry, extract
//! the candidates, validate, persist the report, print the summary.
//!
//! Fatal errors (schema load, input preconditions) propagate out before
//! the report file is touched; the report is always written on the
//! success path regardless of verbosity.

use std::path::PathBuf;

use anyhow::{Context, Result};

use jsift_core::Report;
use jsift_pipeline::{extract, validate_batch, CandidateSource, SchemaRegistry};

/// Everything one batch run needs, constructed by the CLI layer.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory of `<message_type>.json` schema documents.
    pub schema_dir: PathBuf,
    /// Where candidates come from.
    pub source: CandidateSource,
    /// Where the serialized report is written.
    pub report_path: PathBuf,
    /// Print the full report instead of just the aggregate counters.
    pub verbose: bool,
}

/// Runs one validation batch.
pub fn run(config: &RunConfig) -> Result<Report> {
    let registry = SchemaRegistry::load(&config.schema_dir)?;
    tracing::info!(
        schemas = registry.schema_count(),
        dir = %config.schema_dir.display(),
        "schema registry loaded"
    );

    let candidates = extract(&config.source)?;
    tracing::info!(candidates = candidates.len(), "candidates extracted");

    let report = validate_batch(&candidates, &registry);

    let rendered = serde_json::to_string_pretty(&report).context("serializing report")?;
    std::fs::write(&config.report_path, &rendered).with_context(|| {
        format!("failed to write report: {}", config.report_path.display())
    })?;
    tracing::info!(path = %config.report_path.display(), "report written");

    if config.verbose {
        println!("{rendered}");
    } else {
        let summary =
            serde_json::to_string_pretty(&report.result).context("serializing summary")?;
        println!("{summary}");
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_ping_schema(dir: &Path) {
        fs::write(
            dir.join("ping.json"),
            serde_json::to_string_pretty(&json!({
                "type": "object",
                "properties": {
                    "header": {
                        "type": "object",
                        "properties": {"message_type": {"const": "ping"}},
                        "required": ["message_type"]
                    }
                },
                "required": ["header"],
                "additionalProperties": false
            }))
            .unwrap(),
        )
        .unwrap();
    }

    fn workspace() -> (TempDir, PathBuf, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let schemas = dir.path().join("schemas");
        fs::create_dir(&schemas).unwrap();
        write_ping_schema(&schemas);
        let out = dir.path().join("report.out");
        (dir, schemas, out)
    }

    #[test]
    fn log_mode_run_writes_the_report() {
        let (dir, schemas, out) = workspace();
        let log = dir.path().join("app.log");
        fs::write(
            &log,
            "boot\nworker JSON: {\"header\":{\"message_type\":\"ping\"}}\nshutdown\n",
        )
        .unwrap();

        let config = RunConfig {
            schema_dir: schemas,
            source: CandidateSource::LogFile(log),
            report_path: out.clone(),
            verbose: false,
        };
        let report = run(&config).unwrap();
        assert_eq!(report.result.success, 1);
        assert_eq!(report.result.message_processed.get("ping"), Some(1));

        let written: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written["result"]["success"], 1);
        assert_eq!(written["result"]["fail"], 0);
        assert_eq!(written["result"]["exceptions"], 0);
        assert_eq!(written["result"]["message_processed"]["ping"], 1);
    }

    #[test]
    fn directory_mode_run_reads_one_candidate_per_file() {
        let (dir, schemas, out) = workspace();
        let input = dir.path().join("messages");
        fs::create_dir(&input).unwrap();
        fs::write(
            input.join("good.json"),
            r#"{"header":{"message_type":"ping"}}"#,
        )
        .unwrap();
        fs::write(
            input.join("bad.json"),
            r#"{"header":{"message_type":"ping"},"extra":true}"#,
        )
        .unwrap();
        fs::write(input.join("junk.txt"), "not json").unwrap();

        let config = RunConfig {
            schema_dir: schemas,
            source: CandidateSource::Directory(input),
            report_path: out.clone(),
            verbose: true,
        };
        let report = run(&config).unwrap();
        assert_eq!(report.result.success, 1);
        assert_eq!(report.result.fail, 1);
        assert_eq!(report.result.exceptions, 1);

        let written: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written["error_message_1"]["validator"], "additionalProperties");
    }

    #[test]
    fn empty_input_directory_aborts_without_writing_a_report() {
        let (dir, schemas, out) = workspace();
        let input = dir.path().join("empty");
        fs::create_dir(&input).unwrap();

        let config = RunConfig {
            schema_dir: schemas,
            source: CandidateSource::Directory(input),
            report_path: out.clone(),
            verbose: false,
        };
        let err = run(&config).unwrap_err();
        assert!(err.to_string().contains("directory is empty"), "{err}");
        assert!(!out.exists());
    }

    #[test]
    fn malformed_schema_aborts_without_writing_a_report() {
        let (dir, schemas, out) = workspace();
        fs::write(schemas.join("broken.json"), "{ nope").unwrap();
        let log = dir.path().join("app.log");
        fs::write(&log, "JSON: {}\n").unwrap();

        let config = RunConfig {
            schema_dir: schemas,
            source: CandidateSource::LogFile(log),
            report_path: out.clone(),
            verbose: false,
        };
        let err = run(&config).unwrap_err();
        assert!(err.to_string().contains("broken"), "{err}");
        assert!(!out.exists());
    }

    #[test]
    fn markerless_log_produces_an_empty_report() {
        let (dir, schemas, out) = workspace();
        let log = dir.path().join("quiet.log");
        fs::write(&log, "nothing to see\n").unwrap();

        let config = RunConfig {
            schema_dir: schemas,
            source: CandidateSource::LogFile(log),
            report_path: out.clone(),
            verbose: false,
        };
        let report = run(&config).unwrap();
        assert_eq!(report.result.success, 0);
        assert_eq!(report.result.exceptions, 0);
        assert!(out.exists());
    }
}
