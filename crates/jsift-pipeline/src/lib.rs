//! # jsift-pipeline — The Validation Batch Pipeline
//!
//! Three stages, run strictly in sequence:
//!
//! 1. [`registry::SchemaRegistry::load`] — scan a directory of JSON Schema
//!    documents, parse and compile every one of them, and index them by
//!    message type.
//! 2. [`extract::extract`] — turn a log file or a directory of files into
//!    a batch of raw text candidates.
//! 3. [`engine::validate_batch`] — classify every candidate against the
//!    registry and aggregate the outcomes into a report.
//!
//! The pipeline is single-threaded and purely sequential: the batch either
//! runs to completion or aborts entirely on a fatal load/precondition
//! error before any validation work starts.

pub mod engine;
pub mod extract;
pub mod registry;

pub use engine::validate_batch;
pub use extract::{extract, CandidateSource};
pub use registry::{SchemaEntry, SchemaRegistry};
