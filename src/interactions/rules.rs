use crate::models::Severity;

/// A known interacting pair. Members are lowercase substrings; the pair is
/// unordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionRule {
    pub pair: (&'static str, &'static str),
    pub severity: Severity,
    pub reason: &'static str,
}

/// Reference rules, checked in order. The first matching rule wins.
pub static INTERACTION_RULES: &[InteractionRule] = &[
    InteractionRule {
        pair: ("ibuprofen", "naproxen"),
        severity: Severity::Avoid,
        reason: "Two NSAIDs increase GI/renal risk without added benefit.",
    },
    InteractionRule {
        pair: ("simvastatin", "clarithromycin"),
        severity: Severity::Avoid,
        reason: "Clarithromycin inhibits metabolism of simvastatin → rhabdomyolysis risk.",
    },
    InteractionRule {
        pair: ("warfarin", "ibuprofen"),
        severity: Severity::Caution,
        reason: "Bleeding risk increases. Monitor INR and avoid long-term combo.",
    },
    InteractionRule {
        pair: ("metformin", "cimetidine"),
        severity: Severity::Caution,
        reason: "May increase metformin levels. Monitor for GI/lactic acidosis risk.",
    },
];

impl InteractionRule {
    /// Match two already-normalized names against this rule, in either order.
    pub fn matches(&self, a: &str, b: &str) -> bool {
        let (x, y) = self.pair;
        (a.contains(x) && b.contains(y)) || (a.contains(y) && b.contains(x))
    }
}
