//! Status counts and database-wide statistics.
//!
//! The development bucket matches by substring (see
//! [`crate::catalog::DEVELOPMENT_MARKER`]) and is not exclusive of the other
//! buckets, so the three counts need not add up to `total`.

use crate::catalog::{AircraftRecord, CatalogStore};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub total: usize,
    pub active: usize,
    pub retired: usize,
    pub development: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseStats {
    pub manufacturer_count: usize,
    pub total_aircraft: usize,
    pub total_variants: usize,
    pub active_aircraft: usize,
    pub version: String,
    pub last_updated: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// One line of the manufacturer listing.
pub struct ManufacturerOverview {
    pub name: String,
    pub aircraft_count: usize,
    pub active_count: usize,
    /// Most recent `last_verified` among the manufacturer's aircraft.
    pub latest_verified: Option<String>,
}

/// Count statuses over any list of aircraft.
pub fn summarize<'a, I>(aircraft: I) -> StatusSummary
where
    I: IntoIterator<Item = &'a AircraftRecord>,
{
    aircraft
        .into_iter()
        .fold(StatusSummary::default(), |mut summary, record| {
            summary.total += 1;
            if record.status.is_active() {
                summary.active += 1;
            }
            if record.status.is_retired() {
                summary.retired += 1;
            }
            if record.status.is_development() {
                summary.development += 1;
            }
            summary
        })
}

pub fn database_stats(store: &CatalogStore) -> DatabaseStats {
    let mut total_aircraft = 0;
    let mut total_variants = 0;
    let mut active_aircraft = 0;
    for (_, aircraft) in store.aircraft_entries() {
        total_aircraft += 1;
        total_variants += aircraft.variants.len();
        if aircraft.status.is_active() {
            active_aircraft += 1;
        }
    }

    DatabaseStats {
        manufacturer_count: store.manufacturers().len(),
        total_aircraft,
        total_variants,
        active_aircraft,
        version: store.version().to_string(),
        last_updated: store.last_updated().to_string(),
    }
}

/// Per-manufacturer counts in source order.
///
/// `last_verified` values are opaque strings; the latest one is the
/// lexicographic maximum, which matches ISO dates.
pub fn manufacturer_overview(store: &CatalogStore) -> Vec<ManufacturerOverview> {
    store
        .manufacturers()
        .iter()
        .map(|manufacturer| ManufacturerOverview {
            name: manufacturer.name.clone(),
            aircraft_count: manufacturer.aircraft.len(),
            active_count: manufacturer
                .aircraft
                .iter()
                .filter(|aircraft| aircraft.status.is_active())
                .count(),
            latest_verified: manufacturer
                .aircraft
                .iter()
                .map(|aircraft| aircraft.last_verified.as_str())
                .max()
                .map(str::to_string),
        })
        .collect()
}
