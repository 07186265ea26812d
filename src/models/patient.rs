use serde::{Deserialize, Serialize};

use super::enums::Sex;

/// Condition chips offered by the patient form.
pub const CONDITION_OPTIONS: &[&str] = &[
    "Hypertension",
    "Diabetes Type 2",
    "Asthma",
    "CKD (Kidney)",
    "Liver disease",
    "GERD",
    "High cholesterol",
    "Arrhythmia",
];

/// Basic health context sent alongside the regimen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pregnant: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breastfeeding: Option<bool>,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
}

impl Patient {
    /// Add the condition if absent, remove it if present. Order of the
    /// remaining entries is preserved.
    pub fn toggle_condition(&mut self, condition: &str) {
        if let Some(pos) = self.conditions.iter().position(|c| c == condition) {
            self.conditions.remove(pos);
        } else {
            self.conditions.push(condition.to_string());
        }
    }

    /// Replace allergies from comma-separated free text.
    pub fn set_allergies_from_text(&mut self, text: &str) {
        self.allergies = parse_comma_list(text);
    }
}

fn parse_comma_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
