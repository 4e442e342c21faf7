//! # Error Types — Structured Error Hierarchy
//!
//! Fatal error types for the validation pipeline. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! Only conditions that abort the whole run live here. Per-candidate
//! conditions (a candidate that is not JSON, an unknown message type, a
//! schema violation) are not errors: they are outcomes, recorded in the
//! report by [`crate::report::ReportBuilder`] while processing continues.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal error while building the schema registry.
///
/// A corrupt or unreadable schema must not silently vanish from the
/// registry, so any failing schema file aborts the whole load.
#[derive(Error, Debug)]
pub enum SchemaLoadError {
    /// The schema directory is missing or cannot be listed.
    #[error("cannot read schema directory {}: {source}", dir.display())]
    DirUnreadable {
        /// Path of the schema directory.
        dir: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A schema file exists but cannot be read.
    #[error("cannot read schema file {}: {source}", path.display())]
    SchemaUnreadable {
        /// Path of the schema file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A schema file does not contain valid JSON.
    #[error("schema '{name}' is not valid JSON: {source}")]
    MalformedSchema {
        /// Registry key of the offending schema (filename without extension).
        name: String,
        /// Underlying JSON parse error.
        source: serde_json::Error,
    },

    /// A schema parsed as JSON but could not be compiled to a validator,
    /// e.g. an unresolvable cross-schema `$ref`.
    #[error("schema '{name}' failed to compile: {reason}")]
    CompileFailed {
        /// Registry key of the offending schema.
        name: String,
        /// Reason reported by the validator builder.
        reason: String,
    },
}

/// Fatal error raised by input pre-checks before any validation work.
#[derive(Error, Debug)]
pub enum PreconditionError {
    /// Directory-mode input directory does not exist.
    #[error("{}: directory does not exist", path.display())]
    MissingDirectory {
        /// Path that was checked.
        path: PathBuf,
    },

    /// Directory-mode input directory contains no files.
    #[error("{}: directory is empty", path.display())]
    EmptyDirectory {
        /// Path that was checked.
        path: PathBuf,
    },

    /// Single-log-mode log file does not exist.
    #[error("{}: log file does not exist", path.display())]
    MissingLogFile {
        /// Path that was checked.
        path: PathBuf,
    },

    /// An input passed its existence check but could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Unreadable {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}
