//! Readmission prediction orchestration.
//!
//! One remote attempt per invocation; any remote failure is absorbed into a
//! deterministic local heuristic so the caller always gets a result. The
//! `model_available` flag is the only way to tell the two apart.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::intelligence::prediction_client::PredictionService;
use crate::models::{HospitalUtilizationRecord, Verdict};

/// Risk-factor breakdown echoed alongside every prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactorBreakdown {
    pub age: u32,
    pub length_of_stay: u32,
    pub previous_hospitalizations: u32,
    pub emergency_visits: u32,
    pub diabetes_medication: bool,
    pub total_procedures: u32,
}

impl RiskFactorBreakdown {
    fn from_record(record: &HospitalUtilizationRecord) -> Self {
        Self {
            age: record.age,
            length_of_stay: record.length_of_stay,
            previous_hospitalizations: record.previous_inpatient_stays,
            emergency_visits: record.emergency_visits,
            diabetes_medication: record.diabetes_medication.into(),
            total_procedures: record.total_procedures(),
        }
    }
}

/// A 30-day readmission prediction, remote or locally computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    pub verdict: Verdict,
    pub confidence: String,
    pub risk_factors: RiskFactorBreakdown,
    pub model_available: bool,
    pub generated_at: DateTime<Utc>,
}

/// Additive utilization score behind the local fallback, capped at 10.
///
/// Thresholds: age 65+ scores 2 (50+ scores 1), two or more prior inpatient
/// stays score 2 (one scores 1), two or more ER visits score 2 (one scores
/// 1), a stay of a week or longer scores 1, diabetes medication scores 1,
/// a high A1C result scores 1.
pub fn fallback_score(record: &HospitalUtilizationRecord) -> u32 {
    use crate::models::TestResult;

    let mut score = 0;

    score += match record.age {
        65.. => 2,
        50..=64 => 1,
        _ => 0,
    };
    score += match record.previous_inpatient_stays {
        2.. => 2,
        1 => 1,
        0 => 0,
    };
    score += match record.emergency_visits {
        2.. => 2,
        1 => 1,
        0 => 0,
    };
    if record.length_of_stay >= 7 {
        score += 1;
    }
    if bool::from(record.diabetes_medication) {
        score += 1;
    }
    if record.a1c_test == TestResult::High {
        score += 1;
    }

    score.min(10)
}

/// Score at or above which the fallback predicts readmission.
const FALLBACK_VERDICT_THRESHOLD: u32 = 4;

fn fallback_prediction(record: &HospitalUtilizationRecord) -> PredictionResult {
    let score = fallback_score(record);
    let verdict = if score >= FALLBACK_VERDICT_THRESHOLD {
        Verdict::Yes
    } else {
        Verdict::No
    };

    PredictionResult {
        verdict,
        confidence: format!("Rule-based estimate (utilization score {score}/10)"),
        risk_factors: RiskFactorBreakdown::from_record(record),
        model_available: false,
        generated_at: Utc::now(),
    }
}

/// Run one prediction. Never fails: remote errors degrade to the local
/// heuristic with `model_available` set to false. No automatic retry; the
/// caller may invoke again.
pub fn predict_readmission(
    service: &dyn PredictionService,
    record: &HospitalUtilizationRecord,
) -> PredictionResult {
    match service.predict(record) {
        Ok(response) => match Verdict::from_str(&response.prediction) {
            Ok(verdict) => {
                info!(verdict = verdict.as_str(), "remote prediction succeeded");
                PredictionResult {
                    verdict,
                    confidence: response.confidence,
                    risk_factors: RiskFactorBreakdown::from_record(record),
                    model_available: true,
                    generated_at: Utc::now(),
                }
            }
            Err(invalid) => {
                warn!(%invalid, "prediction service returned an unknown verdict, using fallback");
                fallback_prediction(record)
            }
        },
        Err(error) => {
            warn!(%error, "prediction service unavailable, using fallback");
            fallback_prediction(record)
        }
    }
}
