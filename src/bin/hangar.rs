//! Command line browser for the aircraft catalog.
//!
//! Loads the validated dataset once, runs one read-only query and prints the
//! result as plain text (or JSON with `--json`). Dataset and schema paths come
//! from `--database/--schema`, then `HANGAR_DATABASE/HANGAR_SCHEMA`, then the
//! files bundled with the repository.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use hangar::{
    AircraftRecord, CatalogPaths, CatalogStore, flatten_differences, load_catalog_from_paths,
    or_missing,
};
use serde_json::json;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "hangar")]
#[command(about = "Browse the aircraft reference catalog")]
struct Cli {
    /// Catalog dataset (JSON).
    #[arg(long, global = true, value_name = "PATH")]
    database: Option<PathBuf>,
    /// JSON Schema the dataset must satisfy.
    #[arg(long, global = true, value_name = "PATH")]
    schema: Option<PathBuf>,
    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,
    /// Enable debug logging (RUST_LOG still takes precedence).
    #[arg(long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List manufacturers with aircraft counts.
    Manufacturers,
    /// List one manufacturer's aircraft, oldest first, with a status summary.
    Aircraft { manufacturer: String },
    /// Show every detail of one aircraft.
    Show {
        manufacturer: String,
        designation: String,
    },
    /// Rank aircraft against a free-text query.
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Print database-wide statistics.
    Stats,
    /// Write the catalog as CSV ("-" for stdout).
    Export { output: PathBuf },
    /// Load and validate the catalog, then report what was loaded.
    Validate,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("error")
    };
    env_logger::Builder::from_env(env).init();

    let paths = CatalogPaths::resolve(cli.database.clone(), cli.schema.clone())?;
    let store = load_catalog_from_paths(&paths.database, &paths.schema)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Command::Manufacturers => print_manufacturers(&store, cli.json, &mut out),
        Command::Aircraft { manufacturer } => {
            print_aircraft_list(&store, manufacturer, cli.json, &mut out)
        }
        Command::Show {
            manufacturer,
            designation,
        } => print_details(&store, manufacturer, designation, cli.json, &mut out),
        Command::Search { query } => print_search(&store, &query.join(" "), cli.json, &mut out),
        Command::Stats => print_stats(&store, cli.json, &mut out),
        Command::Export { output } => export_csv(&store, output, &mut out),
        Command::Validate => {
            let stats = hangar::database_stats(&store);
            writeln!(
                out,
                "{} OK: catalog {} ({} manufacturers, {} aircraft)",
                paths.database.display(),
                stats.version,
                stats.manufacturer_count,
                stats.total_aircraft
            )?;
            Ok(())
        }
    }
}

fn print_json(value: &impl serde::Serialize, out: &mut impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn print_manufacturers(store: &CatalogStore, as_json: bool, out: &mut impl Write) -> Result<()> {
    let overview = hangar::manufacturer_overview(store);
    if as_json {
        return print_json(&overview, out);
    }
    writeln!(
        out,
        "{:<28} {:>8} {:>8}  {}",
        "Manufacturer", "Aircraft", "Active", "Last Verified"
    )?;
    for row in overview {
        writeln!(
            out,
            "{:<28} {:>8} {:>8}  {}",
            row.name,
            row.aircraft_count,
            row.active_count,
            or_missing(row.latest_verified)
        )?;
    }
    Ok(())
}

fn print_aircraft_list(
    store: &CatalogStore,
    manufacturer: &str,
    as_json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let aircraft = store.sorted_by_introduction_year(manufacturer)?;
    let summary = hangar::summarize(aircraft.iter().copied());
    if as_json {
        return print_json(
            &json!({
                "manufacturer": manufacturer,
                "summary": summary,
                "aircraft": aircraft,
            }),
            out,
        );
    }

    writeln!(
        out,
        "{manufacturer}: {} aircraft ({} active, {} retired, {} in development)",
        summary.total, summary.active, summary.retired, summary.development
    )?;
    writeln!(
        out,
        "{:<12} {:<28} {:<22} {:>8} {:>6}  {}",
        "Designation", "Name", "Status", "Variants", "Year", "Max Speed"
    )?;
    for record in aircraft {
        writeln!(
            out,
            "{:<12} {:<28} {:<22} {:>8} {:>6}  {}",
            record.designation,
            record.name,
            record.status,
            record.variants.len(),
            or_missing(record.introduction_year),
            or_missing(record.mach().map(|mach| format!("M{mach}")))
        )?;
    }
    Ok(())
}

fn print_details(
    store: &CatalogStore,
    manufacturer: &str,
    designation: &str,
    as_json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let record = store.aircraft(manufacturer, designation)?;
    if as_json {
        return print_json(
            &json!({"manufacturer": manufacturer, "aircraft": record}),
            out,
        );
    }
    write_details(manufacturer, record, out)
}

fn write_details(manufacturer: &str, record: &AircraftRecord, out: &mut impl Write) -> Result<()> {
    let specs = &record.specifications;
    writeln!(out, "{} - {}", record.designation, record.name)?;
    writeln!(out, "Basic Information")?;
    writeln!(out, "  Manufacturer: {manufacturer}")?;
    writeln!(out, "  Status: {}", record.status)?;
    writeln!(
        out,
        "  Introduction Year: {}",
        or_missing(record.introduction_year)
    )?;

    writeln!(out, "Specifications")?;
    writeln!(out, "  Dimensions")?;
    let length = |value: Option<hangar::catalog::Length>| {
        or_missing(value.map(|l| format!("{:.2} ft / {:.2} m", l.feet, l.meters)))
    };
    writeln!(out, "    Length: {}", length(specs.dimensions.length))?;
    writeln!(out, "    Wingspan: {}", length(specs.dimensions.wingspan))?;
    writeln!(out, "    Height: {}", length(specs.dimensions.height))?;

    writeln!(out, "  Weights")?;
    let weight = |value: Option<hangar::catalog::Weight>| {
        or_missing(value.map(|w| format!("{} lbs / {} kg", w.pounds, w.kilograms)))
    };
    writeln!(out, "    Empty: {}", weight(specs.weights.empty))?;
    writeln!(out, "    Max Takeoff: {}", weight(specs.weights.max_takeoff))?;

    let performance = &specs.performance;
    writeln!(out, "  Performance")?;
    writeln!(
        out,
        "    Max Speed: {}",
        or_missing(
            performance
                .max_speed
                .map(|s| format!("{} knots (Mach {:.2})", s.knots, s.mach))
        )
    )?;
    writeln!(
        out,
        "    Range: {}",
        or_missing(
            performance
                .range
                .map(|r| format!("{} nm / {} km", r.nautical_miles, r.kilometers))
        )
    )?;
    writeln!(
        out,
        "    Service Ceiling: {}",
        or_missing(
            performance
                .service_ceiling
                .map(|c| format!("{} ft / {} m", c.feet, c.meters))
        )
    )?;
    if !specs.powerplant.is_empty() {
        writeln!(out, "  Powerplant")?;
        for (key, value) in &specs.powerplant {
            let value = value
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| value.to_string());
            writeln!(out, "    {key}: {value}")?;
        }
    }

    if let Some(armament) = &record.armament {
        writeln!(out, "Armament")?;
        writeln!(out, "  Hardpoints: {}", or_missing(armament.hardpoints))?;
        writeln!(out, "  Max Payload: {}", weight(armament.max_payload))?;
        if !armament.weapons.is_empty() {
            writeln!(out, "  Weapons: {}", armament.weapons.join(", "))?;
        }
    }

    writeln!(out, "Source Information")?;
    writeln!(out, "  Type: {}", record.source.kind)?;
    writeln!(out, "  Name: {}", record.source.name)?;
    writeln!(out, "  URL: {}", record.source.url)?;
    writeln!(out, "  Last Verified: {}", record.last_verified)?;

    if !record.variants.is_empty() {
        writeln!(out, "Variants")?;
        for variant in &record.variants {
            writeln!(out, "  {} - {}", variant.designation, variant.name)?;
            if let Some(description) = &variant.description {
                writeln!(out, "    {description}")?;
            }
            if variant.differences.is_empty() {
                continue;
            }
            writeln!(out, "    Differences from base model")?;
            for line in flatten_differences(&variant.differences) {
                let indent = "  ".repeat(line.depth + 3);
                match line.value {
                    Some(value) => writeln!(out, "{indent}{}: {value}", line.key)?,
                    None => writeln!(out, "{indent}{}:", line.key)?,
                }
            }
        }
    }
    Ok(())
}

fn print_search(
    store: &CatalogStore,
    query: &str,
    as_json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let hits = hangar::search(store, query);
    if as_json {
        return print_json(&hits, out);
    }
    if hits.is_empty() {
        writeln!(out, "No matches found for '{query}'")?;
        return Ok(());
    }
    writeln!(
        out,
        "{:>3} {:>5}  {:<20} {:<12} {:<24} {:<20} {:>6}  {}",
        "#", "Score", "Manufacturer", "Designation", "Name", "Status", "Year", "Max Speed"
    )?;
    for (rank, hit) in hits.iter().enumerate() {
        let record = hit.aircraft;
        writeln!(
            out,
            "{:>3} {:>5}  {:<20} {:<12} {:<24} {:<20} {:>6}  {}",
            rank + 1,
            hit.score,
            hit.manufacturer,
            record.designation,
            record.name,
            record.status,
            or_missing(record.introduction_year),
            or_missing(record.mach().map(|mach| format!("M{mach:.1}")))
        )?;
    }
    Ok(())
}

fn print_stats(store: &CatalogStore, as_json: bool, out: &mut impl Write) -> Result<()> {
    let stats = hangar::database_stats(store);
    if as_json {
        return print_json(&stats, out);
    }
    writeln!(out, "Total Manufacturers: {}", stats.manufacturer_count)?;
    writeln!(out, "Total Aircraft: {}", stats.total_aircraft)?;
    writeln!(out, "Total Variants: {}", stats.total_variants)?;
    writeln!(out, "Active Aircraft: {}", stats.active_aircraft)?;
    writeln!(out, "Database Version: {}", stats.version)?;
    writeln!(out, "Last Updated: {}", stats.last_updated)?;
    Ok(())
}

fn export_csv(store: &CatalogStore, output: &Path, out: &mut impl Write) -> Result<()> {
    let rows = hangar::export(store)?;
    if output == Path::new("-") {
        hangar::write_csv(&rows, &mut *out)?;
        return Ok(());
    }

    let file =
        File::create(output).with_context(|| format!("creating {}", output.display()))?;
    hangar::write_csv(&rows, BufWriter::new(file))
        .with_context(|| format!("writing {}", output.display()))?;
    log::info!("exported {} aircraft to {}", rows.len(), output.display());
    writeln!(out, "Database exported to {}", output.display())?;
    Ok(())
}
