//! Free-text aircraft search with deterministic scoring.
//!
//! A record's score starts from how the whole query relates to its
//! designation or name (exact, prefix, substring) and then collects additive
//! per-word bonuses for name hits, speed class, size class, status and
//! introduction year. Scores are not capped. Results are ordered by score
//! descending and then by designation ascending, which callers may rely on.

use crate::catalog::{AircraftRecord, CatalogStore};
use serde::Serialize;

pub const EXACT_SCORE: u32 = 100;
pub const PREFIX_SCORE: u32 = 75;
pub const SUBSTRING_SCORE: u32 = 50;
pub const WORD_BONUS: u32 = 15;
pub const SPEED_BONUS: u32 = 10;
pub const SIZE_BONUS: u32 = 10;
pub const STATUS_BONUS: u32 = 20;
pub const YEAR_BONUS: u32 = 25;

const SONIC_MACH: f64 = 1.0;
const LARGE_TAKEOFF_POUNDS: f64 = 100_000.0;
const SMALL_TAKEOFF_POUNDS: f64 = 50_000.0;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A lower-cased query plus its whitespace-split words.
///
/// The text is not trimmed: surrounding whitespace takes part in the
/// whole-query comparison, so `" f-16"` is not an exact match for `F-16`.
pub struct Query {
    text: String,
    words: Vec<String>,
}

impl Query {
    /// Normalize raw user input. Returns `None` when it holds no words.
    pub fn parse(raw: &str) -> Option<Self> {
        let text = raw.to_lowercase();
        let words: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        if words.is_empty() {
            return None;
        }
        Some(Self { text, words })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchHit<'a> {
    pub manufacturer: &'a str,
    pub aircraft: &'a AircraftRecord,
    pub score: u32,
}

/// Rank every aircraft in the catalog against `query`.
///
/// Records scoring zero are dropped. An empty or whitespace-only query, or
/// one that matches nothing, yields an empty list.
pub fn search<'a>(store: &'a CatalogStore, query: &str) -> Vec<SearchHit<'a>> {
    let Some(query) = Query::parse(query) else {
        return Vec::new();
    };

    let mut hits: Vec<SearchHit<'a>> = store
        .aircraft_entries()
        .filter_map(|(manufacturer, aircraft)| {
            let points = score(aircraft, &query);
            (points > 0).then_some(SearchHit {
                manufacturer,
                aircraft,
                score: points,
            })
        })
        .collect();

    hits.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.aircraft.designation.cmp(&b.aircraft.designation))
    });
    log::debug!("query '{}' matched {} aircraft", query.text(), hits.len());
    hits
}

/// Score one aircraft against a parsed query.
pub fn score(aircraft: &AircraftRecord, query: &Query) -> u32 {
    let designation = aircraft.designation.to_lowercase();
    let name = aircraft.name.to_lowercase();
    let status = aircraft.status.as_str().to_lowercase();
    let year = aircraft.introduction_year.map(|year| year.to_string());
    let mach = aircraft.mach();
    let takeoff_pounds = aircraft.max_takeoff_pounds();

    let mut score = base_score(&designation, &name, query.text());
    for word in query.words() {
        let word = word.as_str();
        if designation.contains(word) || name.contains(word) {
            score += WORD_BONUS;
        }
        score += speed_bonus(word, mach);
        score += size_bonus(word, takeoff_pounds);
        if word == status {
            score += STATUS_BONUS;
        }
        if word.chars().all(|c| c.is_ascii_digit()) && year.as_deref() == Some(word) {
            score += YEAR_BONUS;
        }
    }
    score
}

fn base_score(designation: &str, name: &str, query: &str) -> u32 {
    if designation == query || name == query {
        EXACT_SCORE
    } else if designation.starts_with(query) || name.starts_with(query) {
        PREFIX_SCORE
    } else if designation.contains(query) || name.contains(query) {
        SUBSTRING_SCORE
    } else {
        0
    }
}

// First matching condition wins, so one word earns at most one speed bonus.
fn speed_bonus(word: &str, mach: Option<f64>) -> u32 {
    let Some(mach) = mach else {
        return 0;
    };
    let matched = if word.contains("mach") && mach > SONIC_MACH {
        true
    } else if word == "supersonic" && mach > SONIC_MACH {
        true
    } else {
        word == "subsonic" && mach < SONIC_MACH
    };
    if matched { SPEED_BONUS } else { 0 }
}

fn size_bonus(word: &str, takeoff_pounds: Option<f64>) -> u32 {
    let Some(pounds) = takeoff_pounds else {
        return 0;
    };
    let large = matches!(word, "large" | "heavy") && pounds > LARGE_TAKEOFF_POUNDS;
    let small = matches!(word, "small" | "light") && pounds < SMALL_TAKEOFF_POUNDS;
    if large || small { SIZE_BONUS } else { 0 }
}
