use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{Form, Frequency, Unit};

/// One entry of the regimen, in the shape the planner service expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub id: String,
    pub name: String,
    pub dose: String,
    pub unit: Unit,
    pub form: Form,
    pub frequency: Frequency,
    pub with_food: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Medication {
    /// Blank draft with a fresh id: mg, tablet, once daily, no food.
    pub fn draft() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: String::new(),
            dose: String::new(),
            unit: Unit::default(),
            form: Form::default(),
            frequency: Frequency::default(),
            with_food: false,
            notes: None,
        }
    }

    /// Convenience constructor used by tests and the CLI fixtures.
    pub fn named(name: &str, dose: &str, frequency: Frequency) -> Self {
        Self {
            name: name.to_string(),
            dose: dose.to_string(),
            frequency,
            ..Self::draft()
        }
    }
}
