//! Heuristic dosing hints mined from drug-label text.
//!
//! Keyword matching over the whole label, lowercased. Results are hints for
//! the plan builder and carry no clinical weight on their own.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::LabelSection;

static WITH_FOOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(take with food|with meals|administer with food)").expect("valid regex")
});

static EMPTY_STOMACH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(empty stomach|1 hour before|2 hours after meals)").expect("valid regex")
});

static BEDTIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bbedtime\b").expect("valid regex"));

static MORNING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bmorning\b").expect("valid regex"));

/// Substances a label may warn against taking at the same time, in report order.
pub const COADMIN_KEYWORDS: &[&str] = &[
    "antacids",
    "calcium",
    "iron",
    "magnesium",
    "dairy",
    "grapefruit",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferredTime {
    Bedtime,
    Morning,
}

/// Hints extracted from one label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelHints {
    #[serde(default)]
    pub with_food_hint: bool,
    #[serde(default)]
    pub empty_stomach_hint: bool,
    #[serde(default)]
    pub preferred_time_hint: Option<PreferredTime>,
    #[serde(default, rename = "avoid_coadmin_keywords")]
    pub avoid_coadmin: Vec<String>,
}

/// Hints keyed by lowercased medication name.
pub type HintIndex = HashMap<String, LabelHints>;

/// Extract hints from label text.
///
/// An empty-stomach instruction suppresses the with-food hint. Bedtime beats
/// morning when both appear.
pub fn extract_label_hints(text: &str) -> LabelHints {
    let blob = text.to_lowercase();

    let with_food = WITH_FOOD.is_match(&blob);
    let empty_stomach = EMPTY_STOMACH.is_match(&blob);

    let preferred_time_hint = if BEDTIME.is_match(&blob) {
        Some(PreferredTime::Bedtime)
    } else if MORNING.is_match(&blob) {
        Some(PreferredTime::Morning)
    } else {
        None
    };

    let avoid_coadmin = COADMIN_KEYWORDS
        .iter()
        .filter(|k| blob.contains(*k))
        .map(|k| k.to_string())
        .collect();

    LabelHints {
        with_food_hint: with_food && !empty_stomach,
        empty_stomach_hint: empty_stomach,
        preferred_time_hint,
        avoid_coadmin,
    }
}

/// Join every scalar leaf of a structured label document with spaces.
pub fn flatten_label(value: &serde_json::Value) -> String {
    let mut parts = Vec::new();
    collect_leaves(value, &mut parts);
    parts.join(" ")
}

fn collect_leaves(value: &serde_json::Value, out: &mut Vec<String>) {
    use serde_json::Value;

    match value {
        Value::Null => out.push(String::new()),
        Value::String(s) => out.push(s.clone()),
        Value::Bool(b) => out.push(b.to_string()),
        Value::Number(n) => out.push(n.to_string()),
        Value::Array(items) => items.iter().for_each(|v| collect_leaves(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect_leaves(v, out)),
    }
}

/// Build a hint index from label text per medication name.
pub fn index_hints<'a, I>(labels: I) -> HintIndex
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    labels
        .into_iter()
        .map(|(name, text)| (name.trim().to_lowercase(), extract_label_hints(text)))
        .collect()
}

/// Build a hint index from the sections returned by the planner service.
pub fn index_sections(sections: &[LabelSection]) -> HintIndex {
    sections
        .iter()
        .map(|s| (s.name.trim().to_lowercase(), s.hints.clone()))
        .collect()
}
