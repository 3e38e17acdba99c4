//! Aircraft catalog wiring.
//!
//! This module wraps the JSON dataset under `data/aircraft_database.json` so
//! callers can load a validated snapshot and query it. Types here mirror the
//! schema fields; callers use `CatalogStore` for indexed lookups and
//! `SharedCatalog` when a snapshot is shared and reloaded at runtime.

pub mod identity;
pub mod index;
pub mod model;
pub mod repository;

pub use identity::{AircraftStatus, DEVELOPMENT_MARKER};
pub use index::{CatalogStore, load_catalog_from_paths};
pub use model::{
    AircraftRecord, Armament, Catalog, Dimensions, Distance, Length, ManufacturerRecord,
    Performance, SENTINEL_YEAR, SourceRef, Specifications, Speed, VariantRecord, Weight, Weights,
};
pub use repository::SharedCatalog;
