//! # Report Data Model — Outcomes, Aggregation, and the Final Report
//!
//! A batch run classifies every raw candidate into exactly one
//! [`ValidationOutcome`]. The [`ReportBuilder`] consumes outcomes one at a
//! time, updates exactly one counter per outcome, and finally assembles the
//! immutable [`Report`].
//!
//! ## Output Ordering
//!
//! The serialized report has a fixed key layout:
//! `error_message_1 .. error_message_N` (discovery order, no gaps) followed
//! by `result`. Both the record list and the per-type counters are explicit
//! ordered structures with hand-written `Serialize` impls, so the layout
//! never depends on map iteration order.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;

/// Classification of a single raw candidate.
///
/// Every candidate maps to exactly one variant; each variant updates
/// exactly one aggregate counter.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// The candidate is not valid JSON, or lacks a usable
    /// `header.message_type` discriminator. Counted as an exception.
    ParseFailure,
    /// The message type has no schema in the registry. Skipped silently:
    /// invisible in every serialized counter.
    UnrecognizedType,
    /// The message conforms to its schema.
    Success {
        /// Discriminator read from `header.message_type`.
        message_type: String,
    },
    /// The message violates its schema. First violation wins: one record
    /// per failing message.
    SchemaViolation(Box<FailureRecord>),
}

/// Structured detail for one schema validation violation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureRecord {
    /// The schema keyword that failed, e.g. `"required"` or
    /// `"additionalProperties"`.
    pub validator: String,
    /// Path segments to the failing sub-schema, excluding the leaf keyword.
    pub schema_path: Vec<String>,
    /// Message type of the offending candidate.
    pub message_type: String,
    /// Human-readable description of the violation.
    pub message: String,
    /// The offending instance value.
    pub instance: Value,
    /// The schema fragment that was violated.
    pub schema: Value,
}

/// Per-message-type attempt counters, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeCounts {
    entries: Vec<(String, u64)>,
}

impl TypeCounts {
    /// Creates an empty counter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one attempt for `message_type`, inserting it at the end on
    /// first sight.
    pub fn increment(&mut self, message_type: &str) {
        match self.entries.iter_mut().find(|(t, _)| t == message_type) {
            Some(entry) => entry.1 += 1,
            None => self.entries.push((message_type.to_string(), 1)),
        }
    }

    /// Count for a single message type, if it was ever attempted.
    pub fn get(&self, message_type: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(t, _)| t == message_type)
            .map(|(_, n)| *n)
    }

    /// Sum of all per-type counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    /// Number of distinct message types seen.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no message type was ever attempted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(t, n)| (t.as_str(), *n))
    }
}

impl Serialize for TypeCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (message_type, count) in &self.entries {
            map.serialize_entry(message_type, count)?;
        }
        map.end()
    }
}

/// Aggregate counters of a batch run.
///
/// Serde derive keeps declaration order, so the serialized object is
/// always `success`, `fail`, `exceptions`, `message_processed`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSummary {
    /// Messages that conformed to their schema.
    pub success: u64,
    /// Messages that violated their schema.
    pub fail: u64,
    /// Candidates that could not be parsed or classified.
    pub exceptions: u64,
    /// Validation attempts per message type, first-seen order.
    pub message_processed: TypeCounts,
}

/// The final structured summary of a validation batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Failure records in discovery order; record `i` serializes as
    /// `error_message_{i+1}`.
    pub failures: Vec<FailureRecord>,
    /// Aggregate counters.
    pub result: ResultSummary,
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.failures.len() + 1))?;
        for (i, record) in self.failures.iter().enumerate() {
            map.serialize_entry(&format!("error_message_{}", i + 1), record)?;
        }
        map.serialize_entry("result", &self.result)?;
        map.end()
    }
}

/// Running aggregator for a batch in progress.
///
/// Owned exclusively by the one processing loop; assembly only, so
/// [`ReportBuilder::finalize`] cannot fail.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    success: u64,
    fail: u64,
    exceptions: u64,
    unrecognized: u64,
    processed: TypeCounts,
    failures: Vec<FailureRecord>,
}

impl ReportBuilder {
    /// Creates an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one classified candidate.
    pub fn record(&mut self, outcome: ValidationOutcome) {
        match outcome {
            ValidationOutcome::ParseFailure => self.exceptions += 1,
            ValidationOutcome::UnrecognizedType => self.unrecognized += 1,
            ValidationOutcome::Success { message_type } => {
                self.success += 1;
                self.processed.increment(&message_type);
            }
            ValidationOutcome::SchemaViolation(record) => {
                self.fail += 1;
                self.processed.increment(&record.message_type);
                self.failures.push(*record);
            }
        }
    }

    /// Candidates skipped because their type had no schema. Not part of
    /// the serialized report; exposed so callers can account for every
    /// candidate.
    pub fn unrecognized(&self) -> u64 {
        self.unrecognized
    }

    /// Total candidates recorded so far, including skipped ones.
    pub fn total_recorded(&self) -> u64 {
        self.success + self.fail + self.exceptions + self.unrecognized
    }

    /// Assembles the immutable report.
    pub fn finalize(self) -> Report {
        Report {
            failures: self.failures,
            result: ResultSummary {
                success: self.success,
                fail: self.fail,
                exceptions: self.exceptions,
                message_processed: self.processed,
            },
        }
    }
}
