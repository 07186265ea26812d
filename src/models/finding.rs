use serde::{Deserialize, Serialize};

use super::enums::Severity;

/// Classification of one medication pair, carrying the names as entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub a: String,
    pub b: String,
    pub severity: Severity,
    pub reason: String,
}
