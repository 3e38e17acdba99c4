//! JSON Schema loading and validation for catalog documents.
//!
//! A raw document is never trusted as a catalog until it passes the compiled
//! schema. Every violation is collected with its instance path so a bad
//! dataset can be fixed in one pass; there is no partial-success mode.

use crate::error::{CatalogError, Violation};
use anyhow::{Context, Result};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A compiled catalog schema, reusable across loads.
pub struct CatalogSchema {
    compiled: JSONSchema,
}

impl CatalogSchema {
    /// Compile a schema document. A schema that does not compile is an error
    /// of its own, distinct from a document failing validation.
    pub fn compile(schema: &Value) -> Result<Self, CatalogError> {
        let compiled =
            JSONSchema::compile(schema).map_err(|err| CatalogError::Schema(err.to_string()))?;
        Ok(Self { compiled })
    }

    /// Check `document` against the schema, reporting every violation.
    pub fn validate(&self, document: &Value) -> Result<(), CatalogError> {
        if let Err(errors) = self.compiled.validate(document) {
            let violations = errors
                .map(|err| Violation::new(err.instance_path.to_string(), err.to_string()))
                .collect::<Vec<_>>();
            log::debug!("schema validation failed with {} violation(s)", violations.len());
            return Err(CatalogError::Validation { violations });
        }
        Ok(())
    }
}

/// Validate a raw document against a raw schema in one call.
pub fn validate(document: &Value, schema: &Value) -> Result<(), CatalogError> {
    CatalogSchema::compile(schema)?.validate(document)
}

/// Read and compile a schema file.
pub fn load_json_schema(path: &Path) -> Result<CatalogSchema> {
    let raw = read_json(path, "schema")?;
    CatalogSchema::compile(&raw).with_context(|| format!("compiling schema {}", path.display()))
}

/// Read and parse a JSON file; `label` names the file's role in error messages.
pub fn read_json(path: &Path, label: &str) -> Result<Value> {
    let file = File::open(path).with_context(|| format!("opening {label} {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {label} {}", path.display()))
}
