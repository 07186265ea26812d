use super::classify::classify;
use crate::models::{Finding, Medication};

/// Classify every unordered pair of the regimen.
///
/// Pairs come out in `(i, j)` index order with `i < j`: the first entry
/// against each later one, then the second, and so on.
pub fn scan(medications: &[Medication]) -> Vec<Finding> {
    scan_names(medications.iter().map(|m| m.name.as_str()))
}

/// Same as [`scan`] over bare names.
pub fn scan_names<'a, I>(names: I) -> Vec<Finding>
where
    I: IntoIterator<Item = &'a str>,
{
    let names: Vec<&str> = names.into_iter().collect();
    let pair_count = names.len() * names.len().saturating_sub(1) / 2;
    let mut findings = Vec::with_capacity(pair_count);

    for (i, a) in names.iter().enumerate() {
        for b in &names[i + 1..] {
            let result = classify(a, b);
            findings.push(Finding {
                a: (*a).to_string(),
                b: (*b).to_string(),
                severity: result.severity,
                reason: result.reason.to_string(),
            });
        }
    }

    tracing::trace!(medications = names.len(), findings = findings.len(), "Pairwise scan");
    findings
}
