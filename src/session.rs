//! Per-patient session orchestration.
//!
//! One session owns one patient's in-memory state: the current dosing
//! schedule snapshot and the in-progress checkup form. User actions run to
//! completion one at a time; persistence and alerting go through the
//! collaborator traits in [`crate::store`].

use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::chat::{assistant_reply, ConversationalModel};
use crate::intelligence::{
    classify_checkup, predict_readmission, PredictionService, RiskClassification,
};
use crate::intelligence::readmission::PredictionResult;
use crate::models::{CheckupAnswers, CheckupError, HospitalUtilizationRecord, ScheduleError,
    ScheduleState};
use crate::pipeline::{process_document, TextExtractor, UploadError};
use crate::store::{AlertNotifier, CheckupStore, MedicationStore, StoreError};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Checkup(#[from] CheckupError),

    /// The action itself succeeded in memory; only the write failed.
    #[error("Could not save changes: {0}")]
    Persistence(#[from] StoreError),
}

/// A submitted checkup's outcome.
#[derive(Debug)]
pub struct CheckupOutcome {
    pub checkup_id: Uuid,
    pub classification: RiskClassification,
}

pub struct PatientSession {
    pub patient_id: Uuid,
    pub patient_name: String,
    pub emergency_email: Option<String>,
    schedule: ScheduleState,
    checkup_form: CheckupAnswers,
}

impl PatientSession {
    pub fn new(patient_id: Uuid, patient_name: impl Into<String>) -> Self {
        Self {
            patient_id,
            patient_name: patient_name.into(),
            emergency_email: None,
            schedule: ScheduleState::empty(),
            checkup_form: CheckupAnswers::default(),
        }
    }

    pub fn with_emergency_contact(mut self, email: impl Into<String>) -> Self {
        self.emergency_email = Some(email.into());
        self
    }

    pub fn schedule(&self) -> &ScheduleState {
        &self.schedule
    }

    pub fn checkup_form_mut(&mut self) -> &mut CheckupAnswers {
        &mut self.checkup_form
    }

    /// Parse an uploaded discharge document and replace the whole schedule.
    ///
    /// All-or-nothing up to deduplication: a rejected or unparseable upload
    /// leaves the current schedule untouched. A persistence failure after a
    /// successful parse is surfaced, but the new in-memory schedule is kept
    /// so the parsed result is not lost.
    pub fn upload_document(
        &mut self,
        extractor: &dyn TextExtractor,
        store: &dyn MedicationStore,
        bytes: &[u8],
        media_type: &str,
    ) -> Result<&ScheduleState, SessionError> {
        let medications = process_document(extractor, bytes, media_type)?;
        self.schedule = ScheduleState::from_regimen(medications);

        store.replace_all(self.patient_id, self.schedule.medications())?;
        info!(
            patient = %self.patient_id,
            medications = self.schedule.medications().len(),
            "schedule replaced from uploaded document"
        );
        Ok(&self.schedule)
    }

    /// Remove the uploaded document: clears the schedule and the stored rows.
    pub fn remove_document(&mut self, store: &dyn MedicationStore) -> Result<(), SessionError> {
        self.schedule = ScheduleState::empty();
        store.delete_all(self.patient_id)?;
        Ok(())
    }

    /// Flip one taken flag, then sync the new value to storage.
    pub fn toggle_dose(
        &mut self,
        store: &dyn MedicationStore,
        medication_id: Uuid,
        slot_index: usize,
    ) -> Result<(), SessionError> {
        let next = self.schedule.toggle(medication_id, slot_index)?;
        self.schedule = next;

        let new_value = self
            .schedule
            .get(medication_id)
            .map(|med| med.taken_flags[slot_index])
            .unwrap_or(false);
        store.update_taken_flag(medication_id, slot_index, new_value)?;
        Ok(())
    }

    /// Submit the current checkup form.
    ///
    /// Validation rejects an incomplete form before anything is classified
    /// or written. A high-risk classification fires the emergency alert
    /// when a contact is on file; alert failures are logged and never block
    /// the result. The form resets once the checkup is archived.
    pub fn submit_checkup(
        &mut self,
        store: &dyn CheckupStore,
        notifier: &dyn AlertNotifier,
    ) -> Result<CheckupOutcome, SessionError> {
        let completed = self.checkup_form.complete()?;
        let classification = classify_checkup(&completed);

        let checkup_id = store.insert(
            self.patient_id,
            &completed,
            classification.tier,
            classification.alert_triggered,
        )?;

        if classification.alert_triggered {
            match &self.emergency_email {
                Some(email) => {
                    if let Err(notify_error) =
                        notifier.notify(&self.patient_name, self.patient_id, email)
                    {
                        error!(%notify_error, "emergency alert could not be delivered");
                    }
                }
                None => {
                    warn!(patient = %self.patient_id, "alert triggered but no emergency contact on file");
                }
            }
        }

        self.checkup_form.reset();
        info!(
            patient = %self.patient_id,
            tier = classification.tier.as_str(),
            "checkup archived"
        );
        Ok(CheckupOutcome {
            checkup_id,
            classification,
        })
    }

    /// One readmission prediction for this patient's utilization record.
    /// Infallible by design; see [`predict_readmission`].
    pub fn request_prediction(
        &self,
        service: &dyn PredictionService,
        record: &HospitalUtilizationRecord,
    ) -> PredictionResult {
        predict_readmission(service, record)
    }

    /// Answer a chat message against the current medication list.
    pub fn chat(&self, model: Option<&dyn ConversationalModel>, message: &str) -> String {
        assistant_reply(model, self.schedule.medications(), message)
    }
}
