//! Typed representation of the aircraft catalog document.
//!
//! The structs mirror `schema/aircraft_catalog.schema.json`. Nested
//! measurements are `Option`s: the schema does not force every one of them,
//! and each consumer decides what a missing value means (display paths use
//! [`crate::display::MISSING`], export aborts).

use crate::catalog::identity::AircraftStatus;
use crate::error::CatalogError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Year used for ordering when `introduction_year` is absent.
pub const SENTINEL_YEAR: i32 = 9999;

#[derive(Clone, Debug, PartialEq, Serialize)]
/// The whole dataset of one snapshot. Manufacturers keep source order.
pub struct Catalog {
    pub version: String,
    pub last_updated: String,
    pub manufacturers: Vec<ManufacturerRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ManufacturerRecord {
    pub name: String,
    pub aircraft: Vec<AircraftRecord>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AircraftRecord {
    pub designation: String,
    pub name: String,
    pub status: AircraftStatus,
    #[serde(
        default,
        deserialize_with = "integral_year",
        skip_serializing_if = "Option::is_none"
    )]
    pub introduction_year: Option<i32>,
    pub specifications: Specifications,
    #[serde(default)]
    pub variants: Vec<VariantRecord>,
    pub source: SourceRef,
    pub last_verified: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub armament: Option<Armament>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Specifications {
    #[serde(default)]
    pub dimensions: Dimensions,
    #[serde(default)]
    pub weights: Weights,
    #[serde(default)]
    pub performance: Performance,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub powerplant: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Dimensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wingspan: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Length>,
    /// Any further named dimensions, kept as they appear in the source.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Weights {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty: Option<Weight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_takeoff: Option<Weight>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Performance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_speed: Option<Speed>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<Distance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_ceiling: Option<Length>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct Length {
    pub feet: f64,
    pub meters: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct Weight {
    pub pounds: f64,
    pub kilograms: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct Speed {
    pub knots: f64,
    pub mach: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct Distance {
    pub nautical_miles: f64,
    pub kilometers: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
/// Where the figures for an aircraft came from.
pub struct SourceRef {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct VariantRecord {
    pub designation: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Field-by-field changes from the base model, nested arbitrarily deep.
    #[serde(default)]
    pub differences: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Armament {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardpoints: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_payload: Option<Weight>,
    #[serde(default)]
    pub weapons: Vec<String>,
}

impl AircraftRecord {
    /// Year used for chronological ordering.
    pub fn sort_year(&self) -> i32 {
        self.introduction_year.unwrap_or(SENTINEL_YEAR)
    }

    pub fn mach(&self) -> Option<f64> {
        self.specifications
            .performance
            .max_speed
            .as_ref()
            .map(|speed| speed.mach)
    }

    pub fn max_takeoff_pounds(&self) -> Option<f64> {
        self.specifications
            .weights
            .max_takeoff
            .as_ref()
            .map(|weight| weight.pounds)
    }
}

// JSON Schema's "integer" admits `1978.0`; accept any whole number that fits.
fn integral_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<f64>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if raw.fract() != 0.0 || raw < f64::from(i32::MIN) || raw > f64::from(i32::MAX) {
        return Err(D::Error::custom(format!(
            "introduction_year {raw} is not a whole year"
        )));
    }
    Ok(Some(raw as i32))
}

#[derive(Deserialize)]
struct CatalogHeader {
    database_version: String,
    last_updated: String,
}

#[derive(Deserialize)]
struct RawManufacturer {
    #[serde(default)]
    name: Option<String>,
    aircraft: Vec<AircraftRecord>,
}

impl Catalog {
    /// Decode a parsed document into typed records without schema validation.
    ///
    /// Manufacturer order follows the document's key order. A manufacturer
    /// whose `name` disagrees with its key is rejected; an absent `name` takes
    /// the key.
    pub fn from_value(document: &Value) -> Result<Self, CatalogError> {
        let header = CatalogHeader::deserialize(document)?;
        let entries = document
            .get("manufacturers")
            .and_then(Value::as_object)
            .ok_or_else(|| CatalogError::violation("/manufacturers", "expected an object"))?;

        let mut manufacturers = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let raw = RawManufacturer::deserialize(value)?;
            if let Some(name) = &raw.name {
                if name != key {
                    return Err(CatalogError::violation(
                        format!("/manufacturers/{}/name", escape_pointer_token(key)),
                        format!("name '{name}' does not match manufacturer key '{key}'"),
                    ));
                }
            }
            manufacturers.push(ManufacturerRecord {
                name: key.clone(),
                aircraft: raw.aircraft,
            });
        }

        Ok(Catalog {
            version: header.database_version,
            last_updated: header.last_updated,
            manufacturers,
        })
    }
}

fn escape_pointer_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}
