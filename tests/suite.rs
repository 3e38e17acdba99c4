// Centralized integration suite for the catalog engine; exercises loading and
// validation, lookups, search ranking, summaries, export and the CLI so changes
// surface in one place.
mod support;

use anyhow::Result;
use hangar::{
    AircraftRecord, CSV_HEADER, CatalogError, CatalogStore, MISSING, SharedCatalog, StatusSummary,
    database_stats, export, load_catalog_from_paths, search, summarize, write_csv,
};
use serde_json::{Value, json};
use std::process::Command;
use support::{
    aircraft, bundled_database_path, bundled_schema, bundled_schema_path, fixture_document,
    hangar_binary, run_command, write_json,
};

fn fixture_store() -> CatalogStore {
    CatalogStore::load(&fixture_document(), &bundled_schema()).expect("fixture loads")
}

// The dataset shipped in data/ must satisfy the schema shipped in schema/.
#[test]
fn bundled_dataset_loads_and_validates() -> Result<()> {
    let store = load_catalog_from_paths(&bundled_database_path(), &bundled_schema_path())?;
    let stats = database_stats(&store);
    assert_eq!(stats.manufacturer_count, 2);
    assert_eq!(stats.total_aircraft, 6);
    assert_eq!(stats.total_variants, 3);
    assert_eq!(stats.active_aircraft, 4);
    assert_eq!(stats.version, "2.1.0");
    assert_eq!(stats.last_updated, "2024-03-15");
    Ok(())
}

#[test]
fn fixture_round_trip_lookups() {
    let store = fixture_store();
    assert_eq!(
        store.list_manufacturers(),
        ["Lockheed Martin", "Northrop Grumman"]
    );

    let expected: AircraftRecord = serde_json::from_value(fixture_document()
        ["manufacturers"]["Lockheed Martin"]["aircraft"][1]
        .clone())
    .unwrap();
    let found = store.aircraft("Lockheed Martin", "C-130J").unwrap();
    assert_eq!(found, &expected);

    let missing = store.aircraft("Lockheed Martin", "F-35").unwrap_err();
    assert!(missing.is_not_found());
    let missing = store.aircraft("Boeing", "F-16").unwrap_err();
    assert!(matches!(missing, CatalogError::ManufacturerNotFound(_)));
}

#[test]
fn duplicate_designation_fails_the_load() {
    let mut doc = fixture_document();
    doc["manufacturers"]["Northrop Grumman"]["aircraft"]
        .as_array_mut()
        .unwrap()
        .push(aircraft("B-21", "Raider copy", "Active", Some(2027), 0.9, 1.0));
    let err = CatalogStore::load(&doc, &bundled_schema()).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::DuplicateDesignation { ref manufacturer, ref designation }
            if manufacturer == "Northrop Grumman" && designation == "B-21"
    ));
}

#[test]
fn schema_violation_names_the_offending_field() {
    let mut doc = fixture_document();
    doc["manufacturers"]["Lockheed Martin"]["aircraft"][0]
        .as_object_mut()
        .unwrap()
        .remove("name");
    doc["manufacturers"]["Northrop Grumman"]["aircraft"][0]["introduction_year"] =
        json!("soon");

    let err = CatalogStore::load(&doc, &bundled_schema()).unwrap_err();
    let CatalogError::Validation { violations } = err else {
        panic!("expected validation failure");
    };
    let paths: Vec<&str> = violations.iter().map(|v| v.path.as_str()).collect();
    assert!(
        paths.contains(&"/manufacturers/Lockheed Martin/aircraft/0"),
        "{paths:?}"
    );
    assert!(
        paths.contains(&"/manufacturers/Northrop Grumman/aircraft/0/introduction_year"),
        "{paths:?}"
    );
}

#[test]
fn introduction_year_is_bounded_by_the_schema() {
    let mut doc = fixture_document();
    doc["manufacturers"]["Lockheed Martin"]["aircraft"][0]["introduction_year"] =
        json!(4_000_000_000_i64);
    let err = CatalogStore::load(&doc, &bundled_schema()).unwrap_err();
    let CatalogError::Validation { violations } = err else {
        panic!("expected validation failure");
    };
    assert_eq!(
        violations[0].path,
        "/manufacturers/Lockheed Martin/aircraft/0/introduction_year"
    );

    let mut doc = fixture_document();
    doc["manufacturers"]["Lockheed Martin"]["aircraft"][0]["introduction_year"] = json!(1978.0);
    let store = CatalogStore::load(&doc, &bundled_schema()).unwrap();
    let falcon = store.aircraft("Lockheed Martin", "F-16").unwrap();
    assert_eq!(falcon.introduction_year, Some(1978));
}

#[test]
fn sorted_by_year_puts_undated_last() {
    let mut doc = fixture_document();
    let lockheed = doc["manufacturers"]["Lockheed Martin"]["aircraft"]
        .as_array_mut()
        .unwrap();
    lockheed.push(aircraft("X-59", "QueSST", "Development", None, 1.4, 32_000.0));
    lockheed.push(aircraft("F-117", "Nighthawk", "Retired", Some(1983), 0.92, 52_500.0));
    lockheed.push(aircraft("C-5", "Galaxy", "Active", Some(1970), 0.79, 840_000.0));
    let store = CatalogStore::load(&doc, &bundled_schema()).unwrap();

    let sorted = store.sorted_by_introduction_year("Lockheed Martin").unwrap();
    let designations: Vec<&str> = sorted.iter().map(|a| a.designation.as_str()).collect();
    assert_eq!(designations, ["C-5", "F-16", "F-117", "C-130J", "X-59"]);
    for pair in sorted.windows(2) {
        assert!(pair[0].sort_year() <= pair[1].sort_year());
    }
}

#[test]
fn search_exact_designation_ranks_first() {
    let store = fixture_store();
    let hits = search(&store, "F-16");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].aircraft.designation, "F-16");
    assert_eq!(hits[0].manufacturer, "Lockheed Martin");
    assert!(hits[0].score >= 100);
}

#[test]
fn search_ties_break_by_designation() -> Result<()> {
    let store = load_catalog_from_paths(&bundled_database_path(), &bundled_schema_path())?;
    let hits = search(&store, "supersonic");
    let ranked: Vec<(&str, u32)> = hits
        .iter()
        .map(|hit| (hit.aircraft.designation.as_str(), hit.score))
        .collect();
    assert_eq!(ranked, [("F-16", 10), ("F-22", 10), ("SR-71", 10)]);

    let hits = search(&store, "raptor 2005 active");
    assert_eq!(hits[0].aircraft.designation, "F-22");
    // 15 name word + 25 year + 20 status
    assert_eq!(hits[0].score, 60);
    for pair in hits.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    Ok(())
}

#[test]
fn padded_query_scores_only_the_word_bonus() {
    let store = fixture_store();
    let hits = search(&store, " f-16");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].aircraft.designation, "F-16");
    assert_eq!(hits[0].score, 15);
}

#[test]
fn search_heavy_finds_large_airframes() {
    let store = fixture_store();
    let hits = search(&store, "heavy");
    let designations: Vec<&str> = hits
        .iter()
        .map(|hit| hit.aircraft.designation.as_str())
        .collect();
    assert_eq!(designations, ["B-21", "C-130J"]);
}

#[test]
fn empty_query_returns_no_hits() {
    let store = fixture_store();
    assert!(search(&store, "").is_empty());
    assert!(search(&store, "  \t").is_empty());
    assert!(search(&store, "zeppelin").is_empty());
}

#[test]
fn summarize_counts_development_by_substring() {
    let doc = json!({
        "database_version": "1",
        "last_updated": "2024-01-01",
        "manufacturers": {"Lockheed Martin": {"aircraft": [
            aircraft("F-35A", "Lightning II", "Active", Some(2016), 1.6, 70_000.0),
            aircraft("F-22", "Raptor", "Active", Some(2005), 2.25, 83_500.0),
            aircraft("F-117", "Nighthawk", "Retired", Some(1983), 0.92, 52_500.0),
            aircraft("X-59", "QueSST", "Development/Testing", None, 1.4, 32_000.0)
        ]}}
    });
    let store = CatalogStore::load(&doc, &bundled_schema()).unwrap();
    let summary = summarize(&store.manufacturer("Lockheed Martin").unwrap().aircraft);
    assert_eq!(
        summary,
        StatusSummary {
            total: 4,
            active: 2,
            retired: 1,
            development: 1
        }
    );
}

#[test]
fn export_fixture_produces_complete_rows() -> Result<()> {
    let store = fixture_store();
    let rows = export(&store)?;
    let order: Vec<(&str, &str)> = rows
        .iter()
        .map(|row| (row.manufacturer.as_str(), row.designation.as_str()))
        .collect();
    assert_eq!(
        order,
        [
            ("Lockheed Martin", "F-16"),
            ("Lockheed Martin", "C-130J"),
            ("Northrop Grumman", "B-21")
        ]
    );
    assert_eq!(rows[2].introduction_year, MISSING);

    let mut out = Vec::new();
    write_csv(&rows, &mut out)?;
    let mut reader = csv::Reader::from_reader(out.as_slice());
    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    assert_eq!(header, CSV_HEADER);
    let records = reader
        .records()
        .collect::<Result<Vec<csv::StringRecord>, _>>()?;
    assert_eq!(records.len(), 3);
    for record in &records {
        assert_eq!(record.len(), 17);
        assert!(record.iter().all(|field| !field.is_empty()), "{record:?}");
    }
    assert_eq!(&records[0][0], "Lockheed Martin");
    assert_eq!(&records[0][4], "1978");
    Ok(())
}

#[test]
fn shared_catalog_reload_swaps_only_on_success() -> Result<()> {
    let schema = bundled_schema_path();
    let first = write_json(&fixture_document())?;
    let shared = SharedCatalog::new(load_catalog_from_paths(first.path(), &schema)?);
    let held = shared.snapshot();

    let mut next: Value = fixture_document();
    next["database_version"] = json!("fixture-2");
    let second = write_json(&next)?;
    let reloaded = shared.reload(second.path(), &schema)?;
    assert_eq!(reloaded.version(), "fixture-2");
    assert_eq!(held.version(), "fixture-1");

    let mut broken = fixture_document();
    broken.as_object_mut().unwrap().remove("last_updated");
    let third = write_json(&broken)?;
    assert!(shared.reload(third.path(), &schema).is_err());
    assert_eq!(shared.snapshot().version(), "fixture-2");
    Ok(())
}

fn hangar_command(database: &std::path::Path) -> Command {
    let mut cmd = Command::new(hangar_binary());
    cmd.env_remove("RUST_LOG")
        .arg("--database")
        .arg(database)
        .arg("--schema")
        .arg(bundled_schema_path());
    cmd
}

#[test]
fn cli_search_emits_ranked_json() -> Result<()> {
    let dataset = write_json(&fixture_document())?;
    let mut cmd = hangar_command(dataset.path());
    cmd.args(["--json", "search", "fighting", "falcon"]);
    let output = run_command(cmd)?;
    let hits: Value = serde_json::from_slice(&output.stdout)?;
    let first = &hits[0];
    assert_eq!(first["manufacturer"], "Lockheed Martin");
    assert_eq!(first["aircraft"]["designation"], "F-16");
    assert_eq!(first["score"], 130);
    Ok(())
}

#[test]
fn cli_reports_unknown_aircraft() -> Result<()> {
    let dataset = write_json(&fixture_document())?;
    let mut cmd = hangar_command(dataset.path());
    cmd.args(["show", "Lockheed Martin", "F-35"]);
    let output = cmd.output()?;
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("aircraft 'F-35' not found"), "{stderr}");
    Ok(())
}

#[test]
fn cli_show_renders_placeholders_for_missing_values() -> Result<()> {
    let dataset = write_json(&fixture_document())?;
    let mut cmd = hangar_command(dataset.path());
    cmd.args(["show", "Northrop Grumman", "B-21"]);
    let output = run_command(cmd)?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("B-21 - Raider"), "{stdout}");
    assert!(stdout.contains("Introduction Year: N/A"), "{stdout}");
    assert!(stdout.contains("Status: Development/Testing"), "{stdout}");
    Ok(())
}

#[test]
fn cli_export_to_stdout_writes_header() -> Result<()> {
    let dataset = write_json(&fixture_document())?;
    let mut cmd = hangar_command(dataset.path());
    cmd.args(["export", "-"]);
    let output = run_command(cmd)?;
    let stdout = String::from_utf8(output.stdout)?;
    let mut lines = stdout.lines();
    assert_eq!(lines.next(), Some(CSV_HEADER.join(",").as_str()));
    assert_eq!(lines.count(), 3);
    Ok(())
}

#[test]
fn cli_without_paths_reads_the_bundled_catalog() -> Result<()> {
    let mut cmd = Command::new(hangar_binary());
    cmd.env_remove("RUST_LOG")
        .env_remove("HANGAR_ROOT")
        .env_remove("HANGAR_DATABASE")
        .env_remove("HANGAR_SCHEMA")
        .arg("validate");
    let output = run_command(cmd)?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("OK: catalog 2.1.0 (2 manufacturers, 6 aircraft)"),
        "{stdout}"
    );
    Ok(())
}

#[test]
fn cli_rejects_root_without_bundled_files() -> Result<()> {
    let empty = tempfile::tempdir()?;
    let mut cmd = Command::new(hangar_binary());
    cmd.env_remove("RUST_LOG")
        .env_remove("HANGAR_DATABASE")
        .env_remove("HANGAR_SCHEMA")
        .env("HANGAR_ROOT", empty.path())
        .arg("stats");
    let output = cmd.output()?;
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("HANGAR_ROOT"), "{stderr}");
    Ok(())
}
