//! Flat, fixed-column export of the catalog.
//!
//! Unlike the display paths, export requires every measurement column to be
//! present: one aircraft with a missing dimension, weight or performance
//! figure aborts the whole export with [`CatalogError::MissingField`], so a
//! written file is always complete.

use crate::catalog::{AircraftRecord, CatalogStore};
use crate::display::or_missing;
use crate::error::CatalogError;
use serde::Serialize;
use std::io::Write;

/// Header row, in column order.
pub const CSV_HEADER: [&str; 17] = [
    "Manufacturer",
    "Designation",
    "Name",
    "Status",
    "Introduction Year",
    "Length (ft)",
    "Wingspan (ft)",
    "Height (ft)",
    "Empty Weight (lbs)",
    "Max Takeoff Weight (lbs)",
    "Max Speed (knots)",
    "Max Speed (Mach)",
    "Range (nm)",
    "Service Ceiling (ft)",
    "Number of Variants",
    "Source Type",
    "Last Verified",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
/// One exported aircraft; field order matches [`CSV_HEADER`].
pub struct FlatRow {
    #[serde(rename = "Manufacturer")]
    pub manufacturer: String,
    #[serde(rename = "Designation")]
    pub designation: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Status")]
    pub status: String,
    /// The year, or the display placeholder for undated aircraft.
    #[serde(rename = "Introduction Year")]
    pub introduction_year: String,
    #[serde(rename = "Length (ft)")]
    pub length_ft: f64,
    #[serde(rename = "Wingspan (ft)")]
    pub wingspan_ft: f64,
    #[serde(rename = "Height (ft)")]
    pub height_ft: f64,
    #[serde(rename = "Empty Weight (lbs)")]
    pub empty_weight_lbs: f64,
    #[serde(rename = "Max Takeoff Weight (lbs)")]
    pub max_takeoff_weight_lbs: f64,
    #[serde(rename = "Max Speed (knots)")]
    pub max_speed_knots: f64,
    #[serde(rename = "Max Speed (Mach)")]
    pub max_speed_mach: f64,
    #[serde(rename = "Range (nm)")]
    pub range_nm: f64,
    #[serde(rename = "Service Ceiling (ft)")]
    pub service_ceiling_ft: f64,
    #[serde(rename = "Number of Variants")]
    pub variant_count: usize,
    #[serde(rename = "Source Type")]
    pub source_type: String,
    #[serde(rename = "Last Verified")]
    pub last_verified: String,
}

/// Flatten the catalog into one row per aircraft, manufacturer-then-source order.
pub fn export(store: &CatalogStore) -> Result<Vec<FlatRow>, CatalogError> {
    store
        .aircraft_entries()
        .map(|(manufacturer, aircraft)| flatten(manufacturer, aircraft))
        .collect()
}

fn flatten(manufacturer: &str, aircraft: &AircraftRecord) -> Result<FlatRow, CatalogError> {
    let missing = |field: &'static str| CatalogError::MissingField {
        manufacturer: manufacturer.to_string(),
        designation: aircraft.designation.clone(),
        field,
    };
    let specs = &aircraft.specifications;
    let dimensions = &specs.dimensions;
    let weights = &specs.weights;
    let performance = &specs.performance;

    let length = dimensions.length.ok_or_else(|| missing("dimensions.length"))?;
    let wingspan = dimensions
        .wingspan
        .ok_or_else(|| missing("dimensions.wingspan"))?;
    let height = dimensions.height.ok_or_else(|| missing("dimensions.height"))?;
    let empty = weights.empty.ok_or_else(|| missing("weights.empty"))?;
    let max_takeoff = weights
        .max_takeoff
        .ok_or_else(|| missing("weights.max_takeoff"))?;
    let max_speed = performance
        .max_speed
        .ok_or_else(|| missing("performance.max_speed"))?;
    let range = performance
        .range
        .ok_or_else(|| missing("performance.range"))?;
    let ceiling = performance
        .service_ceiling
        .ok_or_else(|| missing("performance.service_ceiling"))?;

    Ok(FlatRow {
        manufacturer: manufacturer.to_string(),
        designation: aircraft.designation.clone(),
        name: aircraft.name.clone(),
        status: aircraft.status.as_str().to_string(),
        introduction_year: or_missing(aircraft.introduction_year),
        length_ft: length.feet,
        wingspan_ft: wingspan.feet,
        height_ft: height.feet,
        empty_weight_lbs: empty.pounds,
        max_takeoff_weight_lbs: max_takeoff.pounds,
        max_speed_knots: max_speed.knots,
        max_speed_mach: max_speed.mach,
        range_nm: range.nautical_miles,
        service_ceiling_ft: ceiling.feet,
        variant_count: aircraft.variants.len(),
        source_type: aircraft.source.kind.clone(),
        last_verified: aircraft.last_verified.clone(),
    })
}

/// Write `rows` as CSV with the fixed header, even when there are no rows.
pub fn write_csv<W: Write>(rows: &[FlatRow], writer: W) -> Result<(), CatalogError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
