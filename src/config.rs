//! Dataset and schema path resolution.
//!
//! Precedence, highest first: explicit paths (CLI flags), `HANGAR_DATABASE` /
//! `HANGAR_SCHEMA`, then the bundled files under [`crate::bundled_root`].

use crate::{bundled_root, default_database_path, default_schema_path};
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

pub const DATABASE_ENV: &str = "HANGAR_DATABASE";
pub const SCHEMA_ENV: &str = "HANGAR_SCHEMA";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPaths {
    pub database: PathBuf,
    pub schema: PathBuf,
}

impl CatalogPaths {
    pub fn resolve(database: Option<PathBuf>, schema: Option<PathBuf>) -> Result<Self> {
        let database = database.or_else(|| env_path(DATABASE_ENV));
        let schema = schema.or_else(|| env_path(SCHEMA_ENV));
        if let (Some(database), Some(schema)) = (&database, &schema) {
            return Ok(Self {
                database: database.clone(),
                schema: schema.clone(),
            });
        }

        let root = bundled_root().with_context(|| {
            format!("no catalog path given; set {DATABASE_ENV} and {SCHEMA_ENV} or pass --database/--schema")
        })?;
        Ok(Self::with_defaults(&root, database, schema))
    }

    /// Fill whichever path is missing with the bundled file under `root`.
    pub fn with_defaults(root: &Path, database: Option<PathBuf>, schema: Option<PathBuf>) -> Self {
        Self {
            database: database.unwrap_or_else(|| default_database_path(root)),
            schema: schema.unwrap_or_else(|| default_schema_path(root)),
        }
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
