use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What a checkup question probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Symptom,
    Recovery,
    Adherence,
    Safety,
}

/// Metadata for one checkup question.
pub struct CheckupQuestion {
    pub key: &'static str,
    pub prompt: &'static str,
    pub kind: QuestionKind,
}

/// The fixed question set, in presentation order.
pub const QUESTIONS: &[CheckupQuestion] = &[
    CheckupQuestion {
        key: "fever",
        prompt: "Do you still have a fever (temperature above 38°C/100.4°F)?",
        kind: QuestionKind::Symptom,
    },
    CheckupQuestion {
        key: "shortness_of_breath",
        prompt: "Are you experiencing shortness of breath or difficulty breathing?",
        kind: QuestionKind::Symptom,
    },
    CheckupQuestion {
        key: "chest_pain",
        prompt: "Do you have chest pain or tightness?",
        kind: QuestionKind::Symptom,
    },
    CheckupQuestion {
        key: "cough",
        prompt: "Are you still coughing frequently or producing phlegm?",
        kind: QuestionKind::Symptom,
    },
    CheckupQuestion {
        key: "fatigue",
        prompt: "Do you feel unusually tired or weak?",
        kind: QuestionKind::Symptom,
    },
    CheckupQuestion {
        key: "appetite",
        prompt: "Has your appetite returned to normal?",
        kind: QuestionKind::Recovery,
    },
    CheckupQuestion {
        key: "sleep_quality",
        prompt: "Are you sleeping well without breathing difficulties?",
        kind: QuestionKind::Recovery,
    },
    CheckupQuestion {
        key: "medication_adherence",
        prompt: "Are you taking all medications as prescribed?",
        kind: QuestionKind::Adherence,
    },
    CheckupQuestion {
        key: "allergic_reaction",
        prompt: "Have you experienced any allergic reactions to your medications?",
        kind: QuestionKind::Safety,
    },
];

#[derive(Error, Debug, PartialEq)]
pub enum CheckupError {
    #[error("Checkup question '{0}' has not been answered")]
    Unanswered(&'static str),
}

/// In-progress checkup form: every question starts unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckupAnswers {
    pub fever: Option<bool>,
    pub shortness_of_breath: Option<bool>,
    pub chest_pain: Option<bool>,
    pub cough: Option<bool>,
    pub fatigue: Option<bool>,
    pub appetite: Option<bool>,
    pub sleep_quality: Option<bool>,
    pub medication_adherence: Option<bool>,
    pub allergic_reaction: Option<bool>,
}

impl CheckupAnswers {
    /// Validate that every question has an answer, producing the immutable
    /// record a classification runs on. The first unset question is reported.
    pub fn complete(&self) -> Result<CompletedCheckup, CheckupError> {
        let require = |value: Option<bool>, key: &'static str| {
            value.ok_or(CheckupError::Unanswered(key))
        };

        Ok(CompletedCheckup {
            fever: require(self.fever, "fever")?,
            shortness_of_breath: require(self.shortness_of_breath, "shortness_of_breath")?,
            chest_pain: require(self.chest_pain, "chest_pain")?,
            cough: require(self.cough, "cough")?,
            fatigue: require(self.fatigue, "fatigue")?,
            appetite: require(self.appetite, "appetite")?,
            sleep_quality: require(self.sleep_quality, "sleep_quality")?,
            medication_adherence: require(self.medication_adherence, "medication_adherence")?,
            allergic_reaction: require(self.allergic_reaction, "allergic_reaction")?,
        })
    }

    /// Reset to all-unset for the next check-in occasion.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A fully-answered checkup, immutable once submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedCheckup {
    pub fever: bool,
    pub shortness_of_breath: bool,
    pub chest_pain: bool,
    pub cough: bool,
    pub fatigue: bool,
    pub appetite: bool,
    pub sleep_quality: bool,
    pub medication_adherence: bool,
    pub allergic_reaction: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    pub fn all_false() -> CheckupAnswers {
        CheckupAnswers {
            fever: Some(false),
            shortness_of_breath: Some(false),
            chest_pain: Some(false),
            cough: Some(false),
            fatigue: Some(false),
            appetite: Some(false),
            sleep_quality: Some(false),
            medication_adherence: Some(false),
            allergic_reaction: Some(false),
        }
    }

    #[test]
    fn nine_questions_in_fixed_order() {
        assert_eq!(QUESTIONS.len(), 9);
        assert_eq!(QUESTIONS[0].key, "fever");
        assert_eq!(QUESTIONS[8].key, "allergic_reaction");
    }

    #[test]
    fn complete_requires_every_answer() {
        let mut form = all_false();
        form.cough = None;
        assert_eq!(form.complete().unwrap_err(), CheckupError::Unanswered("cough"));

        form.cough = Some(true);
        let completed = form.complete().unwrap();
        assert!(completed.cough);
        assert!(!completed.fever);
    }

    #[test]
    fn blank_form_reports_first_question() {
        let form = CheckupAnswers::default();
        assert_eq!(form.complete().unwrap_err(), CheckupError::Unanswered("fever"));
    }

    #[test]
    fn reset_clears_all_answers() {
        let mut form = all_false();
        form.reset();
        assert!(form.fever.is_none());
        assert!(form.allergic_reaction.is_none());
    }
}
