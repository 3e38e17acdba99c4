//! Error type shared by the catalog engine.
//!
//! Loading errors (`Validation`, `Schema`, `Decode`, `DuplicateDesignation`)
//! are fatal for the snapshot being built; lookups report `*NotFound` and
//! callers are expected to render those as a normal outcome.

use std::fmt;

/// One schema violation: where in the document it happened and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer of the offending value (`/` for the document root).
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            path: if path.is_empty() { "/".to_string() } else { path },
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog failed schema validation:\n{}", join_violations(.violations))]
    Validation { violations: Vec<Violation> },

    #[error("invalid catalog schema: {0}")]
    Schema(String),

    #[error("catalog does not fit the record model: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("duplicate designation '{designation}' under manufacturer '{manufacturer}'")]
    DuplicateDesignation {
        manufacturer: String,
        designation: String,
    },

    #[error("manufacturer '{0}' not found")]
    ManufacturerNotFound(String),

    #[error("aircraft '{designation}' not found under manufacturer '{manufacturer}'")]
    AircraftNotFound {
        manufacturer: String,
        designation: String,
    },

    #[error("cannot export {manufacturer} {designation}: missing {field}")]
    MissingField {
        manufacturer: String,
        designation: String,
        field: &'static str,
    },

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

impl CatalogError {
    pub(crate) fn violation(path: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::Validation {
            violations: vec![Violation::new(path, message)],
        }
    }

    /// True for lookup misses, which are an expected outcome rather than a defect.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::ManufacturerNotFound(_) | CatalogError::AircraftNotFound { .. }
        )
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
