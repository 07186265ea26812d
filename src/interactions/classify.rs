use serde::Serialize;

use super::rules::{InteractionRule, INTERACTION_RULES};
use crate::models::Severity;

/// Reason returned when no rule covers the pair.
pub const NO_MATCH_REASON: &str = "No demo rule matched (placeholder).";

/// Severity plus explanation for one pair of names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub severity: Severity,
    pub reason: &'static str,
}

impl Classification {
    pub const NO_MATCH: Self = Self {
        severity: Severity::None,
        reason: NO_MATCH_REASON,
    };
}

impl From<&InteractionRule> for Classification {
    fn from(rule: &InteractionRule) -> Self {
        Self {
            severity: rule.severity,
            reason: rule.reason,
        }
    }
}

/// Classify two free-text medication names against the reference table.
///
/// Names are trimmed and lowercased, then matched by substring containment,
/// so "Ibuprofen 200mg" still hits the "ibuprofen" rule. Loose by nature:
/// any name that happens to contain a member also matches.
pub fn classify(name_a: &str, name_b: &str) -> Classification {
    classify_with(INTERACTION_RULES, name_a, name_b)
}

/// Same as [`classify`] against a caller-supplied table.
pub fn classify_with(rules: &[InteractionRule], name_a: &str, name_b: &str) -> Classification {
    let a = name_a.trim().to_lowercase();
    let b = name_b.trim().to_lowercase();

    rules
        .iter()
        .find(|rule| rule.matches(&a, &b))
        .map(Classification::from)
        .unwrap_or(Classification::NO_MATCH)
}
