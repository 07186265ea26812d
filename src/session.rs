//! Regimen session: the state behind the planner screens.
//!
//! Holds the medication draft, the regimen, patient context and whatever the
//! planner service last returned. Local findings are recomputed on every
//! read; service results replace (never merge with) what was shown before.

use chrono::{DateTime, Utc};
use thiserror::Error;
use crate::client::{ClientError, PlannerBackend};
use crate::interactions::scan;
use crate::label_hints::{index_sections, HintIndex};
use crate::models::{Finding, Medication, Patient, Plan, RegimenRequest};
use crate::planner;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Medication name is required")]
    EmptyName,

    #[error("Medication dose is required")]
    EmptyDose,

    #[error("Add at least one medication first")]
    EmptyRegimen,

    #[error(transparent)]
    Backend(#[from] ClientError),
}

/// A plan together with the moment it was received.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPlan {
    pub plan: Plan,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct RegimenSession {
    /// Medication being edited before it is added.
    pub draft: Medication,
    pub patient: Patient,
    meds: Vec<Medication>,
    server_findings: Vec<Finding>,
    interaction_error: Option<String>,
    plan: Option<GeneratedPlan>,
    plan_error: Option<String>,
}

impl RegimenSession {
    pub fn new() -> Self {
        Self {
            draft: Medication::draft(),
            patient: Patient::default(),
            meds: Vec::new(),
            server_findings: Vec::new(),
            interaction_error: None,
            plan: None,
            plan_error: None,
        }
    }

    /// Start from a saved regimen (e.g. a CLI input file).
    pub fn from_request(request: RegimenRequest) -> Self {
        Self {
            meds: request.meds,
            patient: request.patient,
            ..Self::new()
        }
    }

    pub fn medications(&self) -> &[Medication] {
        &self.meds
    }

    /// Append the draft to the regimen and reset it with a fresh id.
    ///
    /// Name and dose must be non-blank. A rejected draft is left untouched.
    pub fn add_medication(&mut self) -> Result<String, SessionError> {
        if self.draft.name.trim().is_empty() {
            return Err(SessionError::EmptyName);
        }
        if self.draft.dose.trim().is_empty() {
            return Err(SessionError::EmptyDose);
        }

        let med = std::mem::replace(&mut self.draft, Medication::draft());
        let id = med.id.clone();
        tracing::debug!(%id, frequency = %med.frequency, "Medication added");
        self.meds.push(med);
        Ok(id)
    }

    /// Remove by id. Returns whether anything was removed.
    pub fn remove_medication(&mut self, id: &str) -> bool {
        let before = self.meds.len();
        self.meds.retain(|m| m.id != id);
        let removed = self.meds.len() != before;
        if removed {
            tracing::debug!(%id, "Medication removed");
        }
        removed
    }

    pub fn toggle_condition(&mut self, condition: &str) {
        self.patient.toggle_condition(condition);
    }

    pub fn set_allergies_from_text(&mut self, text: &str) {
        self.patient.set_allergies_from_text(text);
    }

    /// Pairwise findings from the local rule table.
    pub fn local_findings(&self) -> Vec<Finding> {
        scan(&self.meds)
    }

    /// Findings to display: the service's when it returned any, local otherwise.
    pub fn displayed_findings(&self) -> Vec<Finding> {
        if self.server_findings.is_empty() {
            self.local_findings()
        } else {
            self.server_findings.clone()
        }
    }

    pub fn server_findings(&self) -> &[Finding] {
        &self.server_findings
    }

    pub fn interaction_error(&self) -> Option<&str> {
        self.interaction_error.as_deref()
    }

    /// Ask the service for findings.
    ///
    /// On failure the previous service findings are cleared, so the display
    /// falls back to the local scan.
    pub fn check_interactions<B: PlannerBackend>(
        &mut self,
        backend: &B,
    ) -> Result<&[Finding], SessionError> {
        self.interaction_error = None;

        match backend.check_interactions(&self.meds, &self.patient) {
            Ok(findings) => {
                self.server_findings = findings;
                Ok(self.server_findings.as_slice())
            }
            Err(e) => {
                tracing::error!(error = %e, "Interaction fetch failed");
                self.server_findings.clear();
                self.interaction_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    pub fn plan(&self) -> Option<&GeneratedPlan> {
        self.plan.as_ref()
    }

    pub fn plan_error(&self) -> Option<&str> {
        self.plan_error.as_deref()
    }

    /// Ask the service for a dosing plan.
    ///
    /// Does nothing for an empty regimen. A failed request clears the
    /// previous plan rather than leaving a stale one on screen.
    pub fn generate_plan<B: PlannerBackend>(
        &mut self,
        backend: &B,
    ) -> Result<&GeneratedPlan, SessionError> {
        if self.meds.is_empty() {
            return Err(SessionError::EmptyRegimen);
        }
        self.plan_error = None;

        match backend.build_plan(&self.meds, &self.patient) {
            Ok(plan) => Ok(&*self.plan.insert(GeneratedPlan {
                plan,
                generated_at: Utc::now(),
            })),
            Err(e) => {
                tracing::error!(error = %e, "Plan request failed");
                self.plan = None;
                self.plan_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Plan derived locally from the frequency map and label hints.
    pub fn local_plan(&self, hints: &HintIndex) -> Plan {
        planner::build_plan(&self.meds, hints)
    }

    /// Label hints from the service for every medication in the regimen.
    pub fn fetch_label_hints<B: PlannerBackend>(
        &self,
        backend: &B,
    ) -> Result<HintIndex, SessionError> {
        if self.meds.is_empty() {
            return Ok(HintIndex::new());
        }
        let names: Vec<String> = self.meds.iter().map(|m| m.name.clone()).collect();
        let sections = backend.label_sections(&names)?;
        tracing::debug!(requested = names.len(), received = sections.len(), "Fetched label hints");
        Ok(index_sections(&sections))
    }
}

impl Default for RegimenSession {
    fn default() -> Self {
        Self::new()
    }
}
