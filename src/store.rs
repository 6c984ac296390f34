//! Persistence and notification collaborator boundaries.
//!
//! Actual storage lives outside this crate; these traits define the
//! contracts the pipeline writes through. The in-memory implementations
//! back tests and single-session embedding.

use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;
use uuid::Uuid;

use crate::models::{CompletedCheckup, Medication, RiskTier};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("No medication with id {0} is stored")]
    MedicationNotFound(Uuid),

    #[error("Slot index {index} out of range ({slots} slots)")]
    SlotOutOfRange { index: usize, slots: usize },

    #[error("Storage backend failure: {0}")]
    Backend(String),
}

/// Medication persistence. A document upload replaces the patient's whole
/// list; there is no partial merge.
pub trait MedicationStore {
    fn replace_all(&self, patient_id: Uuid, medications: &[Medication]) -> Result<(), StoreError>;
    fn update_taken_flag(
        &self,
        medication_id: Uuid,
        slot_index: usize,
        new_value: bool,
    ) -> Result<(), StoreError>;
    fn list_by_patient(&self, patient_id: Uuid) -> Result<Vec<Medication>, StoreError>;
    fn delete_all(&self, patient_id: Uuid) -> Result<(), StoreError>;
}

/// Checkup archive: one immutable row per submitted checkup.
pub trait CheckupStore {
    fn insert(
        &self,
        patient_id: Uuid,
        answers: &CompletedCheckup,
        tier: RiskTier,
        alert_triggered: bool,
    ) -> Result<Uuid, StoreError>;
}

/// Emergency-contact notification. Fire-and-forget: the caller logs a
/// failure and moves on, the classification result never depends on it.
pub trait AlertNotifier {
    fn notify(
        &self,
        patient_name: &str,
        patient_id: Uuid,
        emergency_email: &str,
    ) -> Result<(), StoreError>;
}

/// In-memory medication store keyed by patient.
#[derive(Default)]
pub struct InMemoryMedicationStore {
    by_patient: Mutex<HashMap<Uuid, Vec<Medication>>>,
}

impl InMemoryMedicationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MedicationStore for InMemoryMedicationStore {
    fn replace_all(&self, patient_id: Uuid, medications: &[Medication]) -> Result<(), StoreError> {
        let mut by_patient = self
            .by_patient
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        by_patient.insert(patient_id, medications.to_vec());
        Ok(())
    }

    fn update_taken_flag(
        &self,
        medication_id: Uuid,
        slot_index: usize,
        new_value: bool,
    ) -> Result<(), StoreError> {
        let mut by_patient = self
            .by_patient
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let med = by_patient
            .values_mut()
            .flat_map(|meds| meds.iter_mut())
            .find(|m| m.id == medication_id)
            .ok_or(StoreError::MedicationNotFound(medication_id))?;

        let slots = med.taken_flags.len();
        let flag = med
            .taken_flags
            .get_mut(slot_index)
            .ok_or(StoreError::SlotOutOfRange { index: slot_index, slots })?;
        *flag = new_value;
        Ok(())
    }

    fn list_by_patient(&self, patient_id: Uuid) -> Result<Vec<Medication>, StoreError> {
        let by_patient = self
            .by_patient
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(by_patient.get(&patient_id).cloned().unwrap_or_default())
    }

    fn delete_all(&self, patient_id: Uuid) -> Result<(), StoreError> {
        let mut by_patient = self
            .by_patient
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        by_patient.remove(&patient_id);
        Ok(())
    }
}

/// Archived checkup row, kept for the in-memory store's test assertions.
#[derive(Debug, Clone)]
pub struct StoredCheckup {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub answers: CompletedCheckup,
    pub tier: RiskTier,
    pub alert_triggered: bool,
}

#[derive(Default)]
pub struct InMemoryCheckupStore {
    rows: Mutex<Vec<StoredCheckup>>,
}

impl InMemoryCheckupStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> Vec<StoredCheckup> {
        self.rows.lock().map(|rows| rows.clone()).unwrap_or_default()
    }
}

impl CheckupStore for InMemoryCheckupStore {
    fn insert(
        &self,
        patient_id: Uuid,
        answers: &CompletedCheckup,
        tier: RiskTier,
        alert_triggered: bool,
    ) -> Result<Uuid, StoreError> {
        let mut rows = self
            .rows
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let id = Uuid::new_v4();
        rows.push(StoredCheckup {
            id,
            patient_id,
            answers: *answers,
            tier,
            alert_triggered,
        });
        Ok(id)
    }
}

/// Notifier that records every alert instead of sending it.
#[derive(Default)]
pub struct RecordingAlertNotifier {
    alerts: Mutex<Vec<(String, Uuid, String)>>,
    fail: bool,
}

impl RecordingAlertNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            alerts: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn alerts(&self) -> Vec<(String, Uuid, String)> {
        self.alerts.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

impl AlertNotifier for RecordingAlertNotifier {
    fn notify(
        &self,
        patient_name: &str,
        patient_id: Uuid,
        emergency_email: &str,
    ) -> Result<(), StoreError> {
        if self.fail {
            return Err(StoreError::Backend("notification channel down".to_string()));
        }
        let mut alerts = self
            .alerts
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        alerts.push((
            patient_name.to_string(),
            patient_id,
            emergency_email.to_string(),
        ));
        Ok(())
    }
}
