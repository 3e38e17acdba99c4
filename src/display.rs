//! Display-side helpers: the placeholder for absent values and flattening of
//! nested variant differences into printable lines.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt::Display;

/// Placeholder shown wherever an optional value is absent.
pub const MISSING: &str = "N/A";

pub fn or_missing<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| MISSING.to_string(), |value| value.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DifferenceLine {
    pub depth: usize,
    pub key: String,
    /// `None` for a heading whose children follow at `depth + 1`.
    pub value: Option<String>,
}

/// Walk a differences mapping depth-first in source order.
pub fn flatten_differences(differences: &Map<String, Value>) -> Vec<DifferenceLine> {
    let mut lines = Vec::new();
    walk(differences, 0, &mut lines);
    lines
}

fn walk(map: &Map<String, Value>, depth: usize, lines: &mut Vec<DifferenceLine>) {
    for (key, value) in map {
        match value {
            Value::Object(children) => {
                lines.push(DifferenceLine {
                    depth,
                    key: key.clone(),
                    value: None,
                });
                walk(children, depth + 1, lines);
            }
            Value::String(text) => lines.push(DifferenceLine {
                depth,
                key: key.clone(),
                value: Some(text.clone()),
            }),
            other => lines.push(DifferenceLine {
                depth,
                key: key.clone(),
                value: Some(other.to_string()),
            }),
        }
    }
}
