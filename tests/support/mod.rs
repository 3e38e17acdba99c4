#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use serde_json::{Value, json};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

pub fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

pub fn bundled_schema_path() -> PathBuf {
    hangar::default_schema_path(&repo_root())
}

pub fn bundled_database_path() -> PathBuf {
    hangar::default_database_path(&repo_root())
}

pub fn bundled_schema() -> Value {
    let raw = std::fs::read_to_string(bundled_schema_path()).expect("bundled schema readable");
    serde_json::from_str(&raw).expect("bundled schema parses")
}

pub fn hangar_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_hangar"))
}

/// A fully specified aircraft entry that satisfies the bundled schema.
pub fn aircraft(
    designation: &str,
    name: &str,
    status: &str,
    year: Option<i32>,
    mach: f64,
    takeoff_pounds: f64,
) -> Value {
    let mut value = json!({
        "designation": designation,
        "name": name,
        "status": status,
        "specifications": {
            "dimensions": {
                "length": {"feet": 50.0, "meters": 15.24},
                "wingspan": {"feet": 40.0, "meters": 12.19},
                "height": {"feet": 16.0, "meters": 4.88}
            },
            "weights": {
                "empty": {"pounds": takeoff_pounds / 2.0, "kilograms": takeoff_pounds / 4.4},
                "max_takeoff": {"pounds": takeoff_pounds, "kilograms": takeoff_pounds / 2.2}
            },
            "performance": {
                "max_speed": {"knots": mach * 661.0, "mach": mach},
                "range": {"nautical_miles": 2000, "kilometers": 3704},
                "service_ceiling": {"feet": 50000, "meters": 15240}
            }
        },
        "variants": [],
        "source": {"type": "manufacturer", "name": "fact sheet", "url": "https://example.invalid"},
        "last_verified": "2024-01-15"
    });
    if let Some(year) = year {
        value["introduction_year"] = json!(year);
    }
    value
}

/// Two manufacturers, three aircraft.
pub fn fixture_document() -> Value {
    json!({
        "database_version": "fixture-1",
        "last_updated": "2024-02-01",
        "manufacturers": {
            "Lockheed Martin": {
                "name": "Lockheed Martin",
                "aircraft": [
                    aircraft("F-16", "Fighting Falcon", "Active", Some(1978), 2.05, 42_300.0),
                    aircraft("C-130J", "Super Hercules", "Active", Some(1999), 0.59, 164_000.0)
                ]
            },
            "Northrop Grumman": {
                "aircraft": [
                    aircraft("B-21", "Raider", "Development/Testing", None, 0.9, 180_000.0)
                ]
            }
        }
    })
}

pub fn write_json(value: &Value) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("failed to allocate temp file")?;
    serde_json::to_writer(&mut file, value)?;
    file.flush()?;
    Ok(file)
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}
