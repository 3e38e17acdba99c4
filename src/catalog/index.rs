//! Indexed, immutable view of one catalog snapshot.
//!
//! The store is strict about duplicate designations within a manufacturer so
//! detail lookups are unambiguous; a dataset that violates this is refused
//! outright instead of loaded with a warning.

use crate::catalog::model::{AircraftRecord, Catalog, ManufacturerRecord};
use crate::error::CatalogError;
use crate::schema_loader::{CatalogSchema, load_json_schema, read_json};
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug)]
/// Catalog plus derived lookup indices.
pub struct CatalogStore {
    catalog: Catalog,
    by_name: BTreeMap<String, usize>,
    // Parallel to `catalog.manufacturers`: designation -> position in `aircraft`.
    by_designation: Vec<BTreeMap<String, usize>>,
}

impl CatalogStore {
    /// Validate `document` against `schema`, decode it, and build the indices.
    pub fn load(document: &Value, schema: &Value) -> Result<Self, CatalogError> {
        let schema = CatalogSchema::compile(schema)?;
        Self::load_with(document, &schema)
    }

    /// Same as [`CatalogStore::load`] with an already compiled schema.
    pub fn load_with(document: &Value, schema: &CatalogSchema) -> Result<Self, CatalogError> {
        schema.validate(document)?;
        Self::from_document(document)
    }

    /// Decode and index a document the caller has already validated.
    pub fn from_document(document: &Value) -> Result<Self, CatalogError> {
        Self::from_catalog(Catalog::from_value(document)?)
    }

    pub fn from_catalog(catalog: Catalog) -> Result<Self, CatalogError> {
        let (by_name, by_designation) = build_index(&catalog)?;
        log::debug!(
            "indexed catalog {} ({} manufacturers)",
            catalog.version,
            catalog.manufacturers.len()
        );
        Ok(Self {
            catalog,
            by_name,
            by_designation,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn version(&self) -> &str {
        &self.catalog.version
    }

    pub fn last_updated(&self) -> &str {
        &self.catalog.last_updated
    }

    /// Manufacturer names in source order.
    pub fn list_manufacturers(&self) -> Vec<&str> {
        self.catalog
            .manufacturers
            .iter()
            .map(|manufacturer| manufacturer.name.as_str())
            .collect()
    }

    pub fn manufacturers(&self) -> &[ManufacturerRecord] {
        &self.catalog.manufacturers
    }

    pub fn manufacturer(&self, name: &str) -> Result<&ManufacturerRecord, CatalogError> {
        self.manufacturer_position(name)
            .map(|idx| &self.catalog.manufacturers[idx])
    }

    /// Resolve one aircraft by manufacturer and exact designation.
    pub fn aircraft(
        &self,
        manufacturer: &str,
        designation: &str,
    ) -> Result<&AircraftRecord, CatalogError> {
        let idx = self.manufacturer_position(manufacturer)?;
        let record = &self.catalog.manufacturers[idx];
        self.by_designation[idx]
            .get(designation)
            .map(|&pos| &record.aircraft[pos])
            .ok_or_else(|| CatalogError::AircraftNotFound {
                manufacturer: manufacturer.to_string(),
                designation: designation.to_string(),
            })
    }

    /// Aircraft of one manufacturer ordered by introduction year.
    ///
    /// Undated aircraft sort as [`crate::catalog::SENTINEL_YEAR`]; equal years
    /// fall back to designation so the order never depends on source layout.
    pub fn sorted_by_introduction_year(
        &self,
        manufacturer: &str,
    ) -> Result<Vec<&AircraftRecord>, CatalogError> {
        let mut aircraft: Vec<&AircraftRecord> =
            self.manufacturer(manufacturer)?.aircraft.iter().collect();
        aircraft.sort_by(|a, b| {
            a.sort_year()
                .cmp(&b.sort_year())
                .then_with(|| a.designation.cmp(&b.designation))
        });
        Ok(aircraft)
    }

    /// Every `(manufacturer, aircraft)` pair, manufacturers in source order and
    /// aircraft in source order within each.
    pub fn aircraft_entries(&self) -> impl Iterator<Item = (&str, &AircraftRecord)> {
        self.catalog.manufacturers.iter().flat_map(|manufacturer| {
            manufacturer
                .aircraft
                .iter()
                .map(move |aircraft| (manufacturer.name.as_str(), aircraft))
        })
    }

    fn manufacturer_position(&self, name: &str) -> Result<usize, CatalogError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| CatalogError::ManufacturerNotFound(name.to_string()))
    }
}

type Indices = (BTreeMap<String, usize>, Vec<BTreeMap<String, usize>>);

fn build_index(catalog: &Catalog) -> Result<Indices, CatalogError> {
    let mut by_name = BTreeMap::new();
    let mut by_designation = Vec::with_capacity(catalog.manufacturers.len());

    for (idx, manufacturer) in catalog.manufacturers.iter().enumerate() {
        by_name.insert(manufacturer.name.clone(), idx);

        let mut designations = BTreeMap::new();
        for (pos, aircraft) in manufacturer.aircraft.iter().enumerate() {
            if designations
                .insert(aircraft.designation.clone(), pos)
                .is_some()
            {
                return Err(CatalogError::DuplicateDesignation {
                    manufacturer: manufacturer.name.clone(),
                    designation: aircraft.designation.clone(),
                });
            }
        }
        by_designation.push(designations);
    }

    Ok((by_name, by_designation))
}

/// Read the dataset and schema from disk and build a store.
///
/// This is the file-reading half of loading; everything after parsing is
/// [`CatalogStore::load_with`].
pub fn load_catalog_from_paths(database: &Path, schema: &Path) -> Result<CatalogStore> {
    let schema = load_json_schema(schema)?;
    let document = read_json(database, "catalog")?;
    let store = CatalogStore::load_with(&document, &schema)
        .with_context(|| format!("loading catalog {}", database.display()))?;
    log::info!(
        "loaded catalog {} from {}",
        store.version(),
        database.display()
    );
    Ok(store)
}
