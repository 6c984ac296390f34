//! Regimen deduplication.

use std::collections::HashSet;

use crate::models::Medication;

/// Remove duplicate medications, keeping the first occurrence of each
/// (lowercased name, lowercased dosage) pair. Stable and idempotent.
pub fn dedup_regimen(medications: Vec<Medication>) -> Vec<Medication> {
    let mut seen = HashSet::new();
    medications
        .into_iter()
        .filter(|med| seen.insert(med.dedup_key()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn med(name: &str, dosage: &str, label: &str) -> Medication {
        Medication::new(
            name.to_string(),
            dosage.to_string(),
            label.to_string(),
            vec!["Take once in the Morning".to_string()],
            "As prescribed by doctor".to_string(),
        )
    }

    #[test]
    fn first_occurrence_wins() {
        let meds = vec![
            med("Aspirin", "81mg", "Once daily"),
            med("Metformin", "500mg", "Twice daily"),
            med("aspirin", "81MG", "At bedtime"),
        ];
        let unique = dedup_regimen(meds);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].name, "Aspirin");
        assert_eq!(unique[0].frequency_label, "Once daily");
        assert_eq!(unique[1].name, "Metformin");
    }

    #[test]
    fn same_name_different_dosage_kept() {
        let meds = vec![med("Aspirin", "81mg", "Once daily"), med("Aspirin", "325mg", "Once daily")];
        assert_eq!(dedup_regimen(meds).len(), 2);
    }

    #[test]
    fn idempotent() {
        let meds = vec![
            med("Aspirin", "81mg", "Once daily"),
            med("Aspirin", "81mg", "Once daily"),
        ];
        let once = dedup_regimen(meds);
        let twice = dedup_regimen(once.clone());
        assert_eq!(once.len(), 1);
        assert_eq!(
            once.iter().map(|m| m.id).collect::<Vec<_>>(),
            twice.iter().map(|m| m.id).collect::<Vec<_>>()
        );
    }

    #[test]
    fn empty_input_passes_through() {
        assert!(dedup_regimen(Vec::new()).is_empty());
    }
}
