//! # jsift-core — Foundational Types for jsift
//!
//! Defines the data model of a validation batch run: per-candidate
//! outcomes, failure records, the running aggregator, and the final
//! report, plus the structured error hierarchy shared by the pipeline
//! and the CLI.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `jsift-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Output ordering is explicit: the report serializes through
//!   hand-written `Serialize` impls over ordered structures, never
//!   through incidental map iteration order.

pub mod error;
pub mod report;

// Re-export primary types for ergonomic imports.
pub use error::{PreconditionError, SchemaLoadError};
pub use report::{
    FailureRecord, Report, ReportBuilder, ResultSummary, TypeCounts, ValidationOutcome,
};
