//! Local dosing plan derivation.
//!
//! Turns a regimen into per-medication dose slots using the frequency map,
//! the patient's food preference and any label hints on hand. The remote
//! planner returns the same `Plan` shape.

use crate::label_hints::{HintIndex, LabelHints, PreferredTime};
use crate::models::{DoseSlot, Frequency, Medication, Plan, PlanItem};
use crate::schedule::{slots_for, BEDTIME_SLOT};

/// Caveat attached to every plan.
pub const EDUCATIONAL_CAVEAT: &str = "Educational tool only—confirm with a licensed clinician.";

const EMPTY_STOMACH_NOTE: &str = "Prefer on an empty stomach.";

/// Build a plan for the regimen, in list order.
pub fn build_plan(medications: &[Medication], hints: &HintIndex) -> Plan {
    let items = medications
        .iter()
        .map(|med| plan_item(med, hints.get(&med.name.trim().to_lowercase())))
        .collect();

    Plan {
        items,
        caveats: vec![EDUCATIONAL_CAVEAT.to_string()],
    }
}

fn plan_item(med: &Medication, hints: Option<&LabelHints>) -> PlanItem {
    let mut times = slots_for(med.frequency);
    let mut with_food = med.with_food;
    let mut notes = Vec::new();

    if let Some(h) = hints {
        with_food = with_food || h.with_food_hint;
        if h.empty_stomach_hint {
            with_food = false;
            notes.push(EMPTY_STOMACH_NOTE.to_string());
        }
        if h.preferred_time_hint == Some(PreferredTime::Bedtime) && med.frequency == Frequency::Qd {
            times = &[BEDTIME_SLOT];
        }
        if !h.avoid_coadmin.is_empty() {
            notes.push(format!("Avoid with: {}", h.avoid_coadmin.join(", ")));
        }
    }

    let slots = times
        .iter()
        .map(|time| DoseSlot {
            time: (*time).to_string(),
            with_food: Some(with_food),
            notes: notes.clone(),
        })
        .collect();

    PlanItem {
        med_id: med.id.clone(),
        med_name: med.name.clone(),
        slots,
    }
}
