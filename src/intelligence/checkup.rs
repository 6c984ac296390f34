//! Symptom risk classification for submitted checkups.

use serde::{Deserialize, Serialize};

use crate::models::{CompletedCheckup, RiskTier};

/// Outcome of classifying one completed checkup.
///
/// Derived data only: recomputed from the checkup snapshot, never stored
/// as mutable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskClassification {
    pub tier: RiskTier,
    pub negative_symptom_count: u32,
    pub positive_recovery_count: u32,
    pub alert_triggered: bool,
    pub message: String,
}

const HIGH_RISK_MESSAGE: &str =
    "Please consult your doctor immediately. Some symptoms need attention.";
const MEDIUM_RISK_MESSAGE: &str =
    "Your recovery is progressing, but please monitor symptoms closely.";
const LOW_RISK_MESSAGE: &str = "You're recovering well! Continue your current treatment plan.";

/// Classify a completed checkup into a risk tier.
///
/// Pure: the same answers always yield the same classification. An allergic
/// reaction forces the high tier and an alert on its own, whatever the
/// other counts say.
pub fn classify_checkup(checkup: &CompletedCheckup) -> RiskClassification {
    let negative_symptom_count = [
        checkup.fever,
        checkup.shortness_of_breath,
        checkup.chest_pain,
        checkup.cough,
        checkup.fatigue,
        checkup.allergic_reaction,
    ]
    .iter()
    .filter(|&&answered_yes| answered_yes)
    .count() as u32;

    let positive_recovery_count = [
        checkup.appetite,
        checkup.sleep_quality,
        checkup.medication_adherence,
    ]
    .iter()
    .filter(|&&answered_yes| answered_yes)
    .count() as u32;

    let (tier, alert_triggered, message) =
        if negative_symptom_count >= 3 || checkup.allergic_reaction {
            (RiskTier::High, true, HIGH_RISK_MESSAGE)
        } else if negative_symptom_count >= 1 || positive_recovery_count < 2 {
            (RiskTier::Medium, false, MEDIUM_RISK_MESSAGE)
        } else {
            (RiskTier::Low, false, LOW_RISK_MESSAGE)
        };

    RiskClassification {
        tier,
        negative_symptom_count,
        positive_recovery_count,
        alert_triggered,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_clear() -> CompletedCheckup {
        CompletedCheckup {
            fever: false,
            shortness_of_breath: false,
            chest_pain: false,
            cough: false,
            fatigue: false,
            appetite: true,
            sleep_quality: true,
            medication_adherence: true,
            allergic_reaction: false,
        }
    }

    #[test]
    fn healthy_recovery_is_low_risk() {
        let result = classify_checkup(&all_clear());
        assert_eq!(result.tier, RiskTier::Low);
        assert_eq!(result.negative_symptom_count, 0);
        assert_eq!(result.positive_recovery_count, 3);
        assert!(!result.alert_triggered);
        assert!(result.message.contains("continue your current treatment plan"));
    }

    #[test]
    fn allergic_reaction_alone_forces_high_and_alert() {
        let checkup = CompletedCheckup {
            allergic_reaction: true,
            appetite: false,
            sleep_quality: false,
            medication_adherence: false,
            ..all_clear()
        };
        let result = classify_checkup(&checkup);
        assert_eq!(result.tier, RiskTier::High);
        assert!(result.alert_triggered);
        assert_eq!(result.negative_symptom_count, 1);
        assert!(result.message.contains("consult your doctor immediately"));
    }

    #[test]
    fn three_negative_symptoms_are_high_risk() {
        let checkup = CompletedCheckup {
            fever: true,
            cough: true,
            fatigue: true,
            ..all_clear()
        };
        let result = classify_checkup(&checkup);
        assert_eq!(result.tier, RiskTier::High);
        assert!(result.alert_triggered);
        assert_eq!(result.negative_symptom_count, 3);
    }

    #[test]
    fn single_symptom_is_medium_risk() {
        let checkup = CompletedCheckup {
            cough: true,
            ..all_clear()
        };
        let result = classify_checkup(&checkup);
        assert_eq!(result.tier, RiskTier::Medium);
        assert!(!result.alert_triggered);
        assert!(result.message.contains("monitor symptoms closely"));
    }

    #[test]
    fn weak_recovery_without_symptoms_is_medium_risk() {
        let checkup = CompletedCheckup {
            appetite: false,
            sleep_quality: false,
            ..all_clear()
        };
        let result = classify_checkup(&checkup);
        assert_eq!(result.tier, RiskTier::Medium);
        assert_eq!(result.positive_recovery_count, 1);
    }

    #[test]
    fn classification_is_deterministic() {
        let checkup = CompletedCheckup {
            fever: true,
            ..all_clear()
        };
        assert_eq!(classify_checkup(&checkup), classify_checkup(&checkup));
    }

    #[test]
    fn adding_a_symptom_never_lowers_the_tier() {
        let base = CompletedCheckup {
            cough: true,
            ..all_clear()
        };
        let worse = CompletedCheckup {
            cough: true,
            fever: true,
            ..all_clear()
        };
        let base_severity = classify_checkup(&base).tier.severity();
        let worse_severity = classify_checkup(&worse).tier.severity();
        assert!(worse_severity >= base_severity);
    }
}
