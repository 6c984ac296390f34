use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// One medication extracted from a discharge summary.
///
/// `taken_flags` mirrors `time_slots` one-to-one: both are at least one
/// entry long and share the same order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medication {
    pub id: Uuid,
    pub name: String,
    pub dosage: String,
    pub frequency_label: String,
    pub time_slots: Vec<String>,
    pub taken_flags: Vec<bool>,
    pub purpose: String,
}

impl Medication {
    /// Build a new medication with every slot marked not-yet-taken.
    ///
    /// `time_slots` must be non-empty; the frequency normalizer always
    /// produces at least one slot.
    pub fn new(
        name: impl Into<String>,
        dosage: impl Into<String>,
        frequency_label: impl Into<String>,
        time_slots: Vec<String>,
        purpose: impl Into<String>,
    ) -> Self {
        debug_assert!(!time_slots.is_empty(), "a medication needs at least one slot");
        let taken_flags = vec![false; time_slots.len()];
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            dosage: dosage.into(),
            frequency_label: frequency_label.into(),
            time_slots,
            taken_flags,
            purpose: purpose.into(),
        }
    }

    /// Deduplication identity: case-insensitive (name, dosage).
    pub fn dedup_key(&self) -> (String, String) {
        (self.name.to_lowercase(), self.dosage.to_lowercase())
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ScheduleError {
    #[error("No medication with id {0} in the current schedule")]
    UnknownMedication(Uuid),

    #[error("Slot index {index} out of range for {name} ({slots} slots)")]
    SlotOutOfRange {
        name: String,
        index: usize,
        slots: usize,
    },
}

/// Immutable snapshot of the patient's current dosing schedule.
///
/// Toggling a taken flag produces a new snapshot; the previous one is
/// untouched, which keeps persistence sync and undo reasoning simple.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleState {
    medications: Vec<Medication>,
}

impl ScheduleState {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Replace-all construction from a freshly parsed regimen.
    pub fn from_regimen(medications: Vec<Medication>) -> Self {
        Self { medications }
    }

    pub fn medications(&self) -> &[Medication] {
        &self.medications
    }

    pub fn is_empty(&self) -> bool {
        self.medications.is_empty()
    }

    pub fn get(&self, medication_id: Uuid) -> Option<&Medication> {
        self.medications.iter().find(|m| m.id == medication_id)
    }

    /// Return a new snapshot with one taken flag flipped.
    pub fn toggle(
        &self,
        medication_id: Uuid,
        slot_index: usize,
    ) -> Result<ScheduleState, ScheduleError> {
        let position = self
            .medications
            .iter()
            .position(|m| m.id == medication_id)
            .ok_or(ScheduleError::UnknownMedication(medication_id))?;

        let med = &self.medications[position];
        if slot_index >= med.taken_flags.len() {
            return Err(ScheduleError::SlotOutOfRange {
                name: med.name.clone(),
                index: slot_index,
                slots: med.taken_flags.len(),
            });
        }

        let mut medications = self.medications.clone();
        medications[position].taken_flags[slot_index] =
            !medications[position].taken_flags[slot_index];
        Ok(ScheduleState { medications })
    }
}
