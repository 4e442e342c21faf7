//! # Validation Engine
//!
//! Classifies every raw candidate against the schema registry and
//! aggregates the outcomes into the final report.
//!
//! Per-candidate conditions never terminate the batch: a candidate that
//! is not JSON (or lacks the `header.message_type` discriminator) counts
//! as an exception, a candidate whose type has no schema is skipped
//! silently, and a schema violation produces one failure record. First
//! violation wins — one record per failing message, not per violated
//! rule.

use serde_json::Value;

use jsift_core::{FailureRecord, Report, ReportBuilder, ValidationOutcome};

use crate::registry::{SchemaEntry, SchemaRegistry};

/// Validates a batch of candidates and assembles the report.
///
/// Purely sequential; cannot fail once the registry and the batch exist.
pub fn validate_batch(candidates: &[String], registry: &SchemaRegistry) -> Report {
    let mut builder = ReportBuilder::new();
    for candidate in candidates {
        let outcome = classify(candidate, registry);
        tracing::debug!(outcome = outcome_label(&outcome), "candidate classified");
        builder.record(outcome);
    }
    tracing::info!(
        total = candidates.len(),
        skipped = builder.unrecognized(),
        "batch validated"
    );
    builder.finalize()
}

/// Classifies one candidate.
fn classify(candidate: &str, registry: &SchemaRegistry) -> ValidationOutcome {
    let data: Value = match serde_json::from_str(candidate) {
        Ok(value) => value,
        Err(error) => {
            tracing::debug!(%error, "candidate is not valid JSON");
            return ValidationOutcome::ParseFailure;
        }
    };

    // The discriminator lives two levels deep. A message without it has
    // an unusable shape and lands in the same exception bucket as a
    // parse failure.
    let Some(message_type) = data
        .get("header")
        .and_then(|header| header.get("message_type"))
        .and_then(Value::as_str)
        .map(str::to_string)
    else {
        tracing::debug!("candidate has no header.message_type");
        return ValidationOutcome::ParseFailure;
    };

    let Some(entry) = registry.get(&message_type) else {
        tracing::debug!(%message_type, "no schema for message type, skipping");
        return ValidationOutcome::UnrecognizedType;
    };

    match entry.validator().validate(&data) {
        Ok(()) => ValidationOutcome::Success { message_type },
        Err(error) => {
            let message = error.to_string();
            let instance = error.instance.as_ref().clone();
            let path_string = error.schema_path.to_string();
            let mut segments: Vec<String> = path_string
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect();
            let validator = segments.pop().unwrap_or_else(|| "schema".to_string());
            let schema = schema_fragment(entry, &segments);
            ValidationOutcome::SchemaViolation(Box::new(FailureRecord {
                validator,
                schema_path: segments,
                message_type,
                message,
                instance,
                schema,
            }))
        }
    }
}

/// Walks the schema document down `segments` to the failing sub-schema.
///
/// When the path crosses a `$ref` boundary the segments no longer match
/// the document tree; the whole document is the fallback fragment.
fn schema_fragment(entry: &SchemaEntry, segments: &[String]) -> Value {
    let mut current = &entry.document;
    for segment in segments {
        let next = match current {
            Value::Object(map) => map.get(segment.as_str()),
            Value::Array(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index)),
            _ => None,
        };
        match next {
            Some(value) => current = value,
            None => return entry.document.clone(),
        }
    }
    current.clone()
}

fn outcome_label(outcome: &ValidationOutcome) -> &'static str {
    match outcome {
        ValidationOutcome::ParseFailure => "parse_failure",
        ValidationOutcome::UnrecognizedType => "unrecognized_type",
        ValidationOutcome::Success { .. } => "success",
        ValidationOutcome::SchemaViolation(_) => "schema_violation",
    }
}
