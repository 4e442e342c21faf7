//! # Message Extractor
//!
//! Turns an input location into a batch of raw text candidates. A
//! candidate is an opaque blob thought to contain one JSON message; it is
//! the engine's job to find out whether it actually does.
//!
//! Preconditions are checked before any extraction work: a missing log
//! file, or a missing/empty candidate directory, aborts the whole run.

use std::path::PathBuf;

use jsift_core::PreconditionError;

/// Marker preceding an embedded JSON payload in a log line.
pub const JSON_MARKER: &str = "JSON: ";

/// Where candidates come from.
#[derive(Debug, Clone)]
pub enum CandidateSource {
    /// One plain-text log file; every line carrying [`JSON_MARKER`]
    /// contributes one candidate.
    LogFile(PathBuf),
    /// A directory of files; each file's entire content is one candidate.
    Directory(PathBuf),
}

/// Extracts the batch of raw candidates for `source`.
///
/// A log file without any marker yields an empty batch, which is not an
/// error. Directory-mode files are read in name order so repeated runs
/// see the same batch.
pub fn extract(source: &CandidateSource) -> Result<Vec<String>, PreconditionError> {
    match source {
        CandidateSource::LogFile(path) => {
            if !path.exists() {
                return Err(PreconditionError::MissingLogFile { path: path.clone() });
            }
            let raw = std::fs::read_to_string(path).map_err(|e| PreconditionError::Unreadable {
                path: path.clone(),
                source: e,
            })?;
            Ok(marked_payloads(&raw))
        }
        CandidateSource::Directory(dir) => {
            if !dir.is_dir() {
                return Err(PreconditionError::MissingDirectory { path: dir.clone() });
            }
            let entries = std::fs::read_dir(dir).map_err(|e| PreconditionError::Unreadable {
                path: dir.clone(),
                source: e,
            })?;

            let mut files: Vec<PathBuf> = entries
                .filter_map(Result::ok)
                .map(|entry| entry.path())
                .filter(|path| path.is_file())
                .collect();
            if files.is_empty() {
                return Err(PreconditionError::EmptyDirectory { path: dir.clone() });
            }
            files.sort();

            let mut candidates = Vec::with_capacity(files.len());
            for path in files {
                let content =
                    std::fs::read_to_string(&path).map_err(|e| PreconditionError::Unreadable {
                        path: path.clone(),
                        source: e,
                    })?;
                candidates.push(content);
            }
            Ok(candidates)
        }
    }
}

/// Every line containing [`JSON_MARKER`] yields the text after its first
/// occurrence, through end of line.
fn marked_payloads(raw: &str) -> Vec<String> {
    raw.lines()
        .filter_map(|line| {
            line.find(JSON_MARKER)
                .map(|at| line[at + JSON_MARKER.len()..].to_string())
        })
        .collect()
}
