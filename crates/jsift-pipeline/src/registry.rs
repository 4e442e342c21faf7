//! # Schema Registry
//!
//! Loads every JSON Schema document from a directory and indexes it by
//! message type (the filename without its `.json` extension). Validators
//! are compiled eagerly at load time, so a schema that cannot be read,
//! parsed, or compiled aborts the run before any validation work starts.
//!
//! ## Schema Resolution
//!
//! Cross-schema `$ref` URIs are resolved by a retriever owned by the
//! registry, never by network access. Each loaded schema is registered
//! under its own `$id` (when present), a `file://<dir>/<name>.json` URI,
//! its bare filename, and its stem, so both absolute and
//! filename-relative references between schemas in the same directory
//! resolve without pre-flattening. A reference that matches none of these
//! is a load-time error.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use jsonschema::{Retrieve, Uri, Validator};
use serde_json::Value;

use jsift_core::SchemaLoadError;

/// File suffix a directory entry must carry to be considered a schema.
const SCHEMA_SUFFIX: &str = ".json";

/// One loaded schema: the parsed document plus its compiled validator.
pub struct SchemaEntry {
    /// The parsed schema body, kept for failure-record fragments.
    pub document: Value,
    validator: Validator,
}

impl SchemaEntry {
    /// The compiled validator for this schema.
    pub fn validator(&self) -> &Validator {
        &self.validator
    }
}

/// Resolves `$ref` URIs against the schemas loaded in memory.
struct RegistryRetriever {
    schemas_by_uri: Arc<HashMap<String, Value>>,
}

impl Retrieve for RegistryRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();

        if let Some(value) = self.schemas_by_uri.get(uri_str) {
            return Ok(value.clone());
        }

        // Fall back to the filename, then the stem, so references keep
        // working whatever base the referencing schema used.
        let filename = uri_str.rsplit('/').next().unwrap_or(uri_str);
        if let Some(value) = self.schemas_by_uri.get(filename) {
            return Ok(value.clone());
        }
        if let Some(stem) = filename.strip_suffix(SCHEMA_SUFFIX) {
            if let Some(value) = self.schemas_by_uri.get(stem) {
                return Ok(value.clone());
            }
        }

        Err(format!("unresolvable schema reference: {uri_str}").into())
    }
}

impl std::fmt::Debug for SchemaEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaEntry")
            .field("document", &self.document)
            .finish_non_exhaustive()
    }
}

/// Read-only index of schema documents keyed by message type.
pub struct SchemaRegistry {
    schema_dir: PathBuf,
    entries: HashMap<String, SchemaEntry>,
}

impl SchemaRegistry {
    /// Loads all `*.json` files in `schema_dir` (non-recursively).
    ///
    /// Every file must parse as JSON and compile to a validator;
    /// otherwise the whole load fails with [`SchemaLoadError`]. A corrupt
    /// schema must not silently vanish from the registry.
    pub fn load(schema_dir: impl AsRef<Path>) -> Result<Self, SchemaLoadError> {
        let schema_dir = schema_dir.as_ref().to_path_buf();

        let dir_entries =
            std::fs::read_dir(&schema_dir).map_err(|e| SchemaLoadError::DirUnreadable {
                dir: schema_dir.clone(),
                source: e,
            })?;

        // First pass: read and parse every schema document.
        let mut documents: Vec<(String, Value)> = Vec::new();
        for dir_entry in dir_entries {
            let dir_entry = dir_entry.map_err(|e| SchemaLoadError::DirUnreadable {
                dir: schema_dir.clone(),
                source: e,
            })?;
            let path = dir_entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(stem) = filename.strip_suffix(SCHEMA_SUFFIX) else {
                continue;
            };

            let content = std::fs::read_to_string(&path).map_err(|e| {
                SchemaLoadError::SchemaUnreadable {
                    path: path.clone(),
                    source: e,
                }
            })?;
            let document: Value =
                serde_json::from_str(&content).map_err(|e| SchemaLoadError::MalformedSchema {
                    name: stem.to_string(),
                    source: e,
                })?;
            documents.push((stem.to_string(), document));
        }

        // Second pass: register every document for $ref resolution, then
        // compile each one against the full set.
        let mut schemas_by_uri: HashMap<String, Value> = HashMap::new();
        for (name, document) in &documents {
            let filename = format!("{name}{SCHEMA_SUFFIX}");
            schemas_by_uri.insert(
                format!("file://{}/{filename}", schema_dir.display()),
                document.clone(),
            );
            schemas_by_uri.insert(filename, document.clone());
            schemas_by_uri.insert(name.clone(), document.clone());
            if let Some(id) = document.get("$id").and_then(Value::as_str) {
                schemas_by_uri.insert(id.to_string(), document.clone());
            }
        }
        let schemas_by_uri = Arc::new(schemas_by_uri);

        let mut entries = HashMap::new();
        for (name, document) in documents {
            let validator = compile(&name, &document, &schemas_by_uri)?;
            tracing::debug!(schema = %name, "schema compiled");
            entries.insert(name, SchemaEntry { document, validator });
        }

        Ok(Self { schema_dir, entries })
    }

    /// Looks up the schema for a message type.
    pub fn get(&self, message_type: &str) -> Option<&SchemaEntry> {
        self.entries.get(message_type)
    }

    /// True if a schema exists for `message_type`.
    pub fn contains(&self, message_type: &str) -> bool {
        self.entries.contains_key(message_type)
    }

    /// Number of loaded schemas.
    pub fn schema_count(&self) -> usize {
        self.entries.len()
    }

    /// Names of all loaded schemas, sorted alphabetically.
    pub fn schema_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// The directory this registry was loaded from.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }
}

impl std::fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("schema_dir", &self.schema_dir)
            .field("schemas", &self.schema_names())
            .finish()
    }
}

/// Compile one schema document with the registry-scoped retriever.
fn compile(
    name: &str,
    document: &Value,
    schemas_by_uri: &Arc<HashMap<String, Value>>,
) -> Result<Validator, SchemaLoadError> {
    let mut options = jsonschema::options();
    options.with_draft(jsonschema::Draft::Draft202012);
    options.with_retriever(RegistryRetriever {
        schemas_by_uri: Arc::clone(schemas_by_uri),
    });
    options
        .build(document)
        .map_err(|e| SchemaLoadError::CompileFailed {
            name: name.to_string(),
            reason: e.to_string(),
        })
}
