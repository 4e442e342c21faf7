//! # jsift-cli — Command-Line Interface for jsift
//!
//! Thin glue over the pipeline: turns parsed flags into a [`run::RunConfig`],
//! drives the batch run, persists the report, and prints either the full
//! report or just the aggregate counters.
//!
//! ```bash
//! jsift --schemas schemas/ --log app.log
//! jsift --schemas schemas/ --input-dir messages/ -f -v --out report.json
//! ```

pub mod run;

pub use run::{run, RunConfig};
