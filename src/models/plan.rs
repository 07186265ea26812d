use serde::{Deserialize, Serialize};

use super::{Finding, Medication, Patient};
use crate::label_hints::LabelHints;

/// One timed dose within a plan item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoseSlot {
    pub time: String,
    #[serde(default)]
    pub with_food: Option<bool>,
    #[serde(default)]
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanItem {
    pub med_id: String,
    pub med_name: String,
    pub slots: Vec<DoseSlot>,
}

/// A dosing plan: per medication slots plus general caveats.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub items: Vec<PlanItem>,
    #[serde(default)]
    pub caveats: Vec<String>,
}

/// Body shared by the interaction and plan requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegimenRequest {
    pub meds: Vec<Medication>,
    #[serde(default)]
    pub patient: Patient,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionsResponse {
    #[serde(default)]
    pub findings: Vec<Finding>,
}

/// RxNorm normalization result for a single name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedName {
    pub name: String,
    pub rxcui: Option<String>,
}

/// Label hints the service mined for a single name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelSection {
    pub name: String,
    pub setid: Option<String>,
    #[serde(default)]
    pub hints: LabelHints,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_parses_service_response() {
        let json = r#"{
            "items": [{
                "med_id": "m1",
                "med_name": "Metformin",
                "slots": [
                    {"time": "08:00", "with_food": true, "notes": []},
                    {"time": "20:00"}
                ]
            }],
            "caveats": ["Educational tool only"]
        }"#;
        let plan: Plan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.items.len(), 1);
        assert_eq!(plan.items[0].slots[0].with_food, Some(true));
        assert_eq!(plan.items[0].slots[1].with_food, None);
        assert!(plan.items[0].slots[1].notes.is_empty());
    }

    #[test]
    fn regimen_request_defaults_patient() {
        let req: RegimenRequest = serde_json::from_str(r#"{"meds": []}"#).unwrap();
        assert!(req.meds.is_empty());
        assert_eq!(req.patient, Patient::default());
    }

    #[test]
    fn label_section_tolerates_missing_hints() {
        let section: LabelSection =
            serde_json::from_str(r#"{"name": "levothyroxine", "setid": null}"#).unwrap();
        assert!(section.setid.is_none());
        assert_eq!(section.hints, LabelHints::default());
    }

    #[test]
    fn label_section_carries_typed_hints() {
        let section: LabelSection = serde_json::from_str(
            r#"{"name": "simvastatin", "setid": "abc",
                "hints": {"preferred_time_hint": "bedtime",
                          "avoid_coadmin_keywords": ["grapefruit"]}}"#,
        )
        .unwrap();
        assert_eq!(
            section.hints.preferred_time_hint,
            Some(crate::label_hints::PreferredTime::Bedtime)
        );
        assert_eq!(section.hints.avoid_coadmin, ["grapefruit"]);
        assert!(!section.hints.with_food_hint);
    }
}
