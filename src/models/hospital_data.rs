use serde::{Deserialize, Serialize};

use super::enums::{TestResult, YesNo};

/// Hospital administrative data feeding the readmission prediction.
///
/// Mirrors the remote predictive service's request body field-for-field.
/// The three visit counts default to zero when absent; everything else is
/// required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HospitalUtilizationRecord {
    pub age: u32,
    pub length_of_stay: u32,
    pub num_lab_procedures: u32,
    pub num_other_procedures: u32,
    pub num_medications: u32,
    #[serde(default)]
    pub outpatient_visits: u32,
    #[serde(default)]
    pub previous_inpatient_stays: u32,
    #[serde(default)]
    pub emergency_visits: u32,
    pub diabetes_medication: YesNo,
    pub glucose_test: TestResult,
    pub a1c_test: TestResult,
}

impl HospitalUtilizationRecord {
    pub fn total_procedures(&self) -> u32 {
        self.num_lab_procedures + self.num_other_procedures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visit_counts_default_to_zero() {
        let record: HospitalUtilizationRecord = serde_json::from_value(serde_json::json!({
            "age": 72,
            "length_of_stay": 5,
            "num_lab_procedures": 40,
            "num_other_procedures": 2,
            "num_medications": 12,
            "diabetes_medication": "yes",
            "glucose_test": "normal",
            "a1c_test": "not_done"
        }))
        .unwrap();

        assert_eq!(record.outpatient_visits, 0);
        assert_eq!(record.previous_inpatient_stays, 0);
        assert_eq!(record.emergency_visits, 0);
        assert_eq!(record.total_procedures(), 42);
        assert_eq!(record.diabetes_medication, YesNo::Yes);
    }

    #[test]
    fn wire_field_names_survive_round_trip() {
        let record = HospitalUtilizationRecord {
            age: 60,
            length_of_stay: 3,
            num_lab_procedures: 10,
            num_other_procedures: 1,
            num_medications: 4,
            outpatient_visits: 2,
            previous_inpatient_stays: 1,
            emergency_visits: 0,
            diabetes_medication: YesNo::No,
            glucose_test: TestResult::High,
            a1c_test: TestResult::Normal,
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["num_lab_procedures"], 10);
        assert_eq!(value["glucose_test"], "high");
        assert_eq!(serde_json::from_value::<HospitalUtilizationRecord>(value).unwrap(), record);
    }
}
