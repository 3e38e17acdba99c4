//! Shared library for the hangar aircraft catalog.
//!
//! The crate loads a schema-validated aircraft dataset into an immutable,
//! indexed snapshot and answers read-only queries over it: manufacturer and
//! aircraft lookup, chronological listing, ranked free-text search, status
//! summaries and flat export. File I/O is limited to the loader helpers and
//! bundled-root lookup below; the query modules work purely on loaded data.

use anyhow::{Result, bail};
use std::{
    env,
    path::{Path, PathBuf},
};

pub mod catalog;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod schema_loader;
pub mod search;
pub mod summary;

pub use catalog::{
    AircraftRecord, AircraftStatus, Catalog, CatalogStore, ManufacturerRecord, SENTINEL_YEAR,
    SharedCatalog, VariantRecord, load_catalog_from_paths,
};
pub use config::CatalogPaths;
pub use display::{MISSING, flatten_differences, or_missing};
pub use error::{CatalogError, Violation};
pub use export::{CSV_HEADER, FlatRow, export, write_csv};
pub use schema_loader::{CatalogSchema, load_json_schema, validate};
pub use search::{Query, SearchHit, search};
pub use summary::{
    DatabaseStats, ManufacturerOverview, StatusSummary, database_stats, manufacturer_overview,
    summarize,
};

/// Overrides the directory the bundled dataset and schema are read from.
pub const ROOT_ENV: &str = "HANGAR_ROOT";

const DATABASE_FILE: &str = "data/aircraft_database.json";
const SCHEMA_FILE: &str = "schema/aircraft_catalog.schema.json";

/// Directory holding the bundled `data/` and `schema/` trees.
///
/// `HANGAR_ROOT` when set, else the checkout this crate was compiled from.
pub fn bundled_root() -> Result<PathBuf> {
    let root = env::var_os(ROOT_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")));
    ensure_bundled_schema(root)
}

fn ensure_bundled_schema(root: PathBuf) -> Result<PathBuf> {
    if !default_schema_path(&root).is_file() {
        bail!(
            "{} has no {SCHEMA_FILE}; point {ROOT_ENV} at a hangar checkout",
            root.display()
        );
    }
    Ok(root)
}

/// Bundled dataset under `root`.
pub fn default_database_path(root: &Path) -> PathBuf {
    root.join(DATABASE_FILE)
}

/// Bundled schema under `root`.
pub fn default_schema_path(root: &Path) -> PathBuf {
    root.join(SCHEMA_FILE)
}
