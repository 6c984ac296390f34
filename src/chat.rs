//! Medication assistant chat.
//!
//! The language model behind conversational replies is an external
//! collaborator; this module supplies the medication context it needs and
//! carries the deterministic rule-based replies used when no model is
//! wired up.

use thiserror::Error;
use tracing::warn;

use crate::models::Medication;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Conversational model failed: {0}")]
    Model(String),
}

/// Conversational NLG boundary. Implementations receive the user's message
/// plus a pre-built medication context and return free text; nothing here
/// ever parses the reply.
pub trait ConversationalModel {
    fn generate_reply(&self, context: &str, message: &str) -> Result<String, ChatError>;
}

/// Render the medication list as model context, one entry per drug:
/// "Name (dosage) - frequency".
pub fn medication_context(medications: &[Medication]) -> String {
    medications
        .iter()
        .map(|med| format!("{} ({}) - {}", med.name, med.dosage, med.frequency_label))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Deterministic reply rules, used when no model is available. A mention of
/// a known medication wins over the generic keyword rules.
pub fn fallback_reply(medications: &[Medication], message: &str) -> String {
    let lower = message.to_lowercase();

    for med in medications {
        if lower.contains(&med.name.to_lowercase()) {
            return format!(
                "Regarding {}: The prescribed dosage is {}, to be taken {}. \
                 It's primarily for {}. Always follow your doctor's advice.",
                med.name,
                med.dosage,
                med.frequency_label.to_lowercase(),
                med.purpose.to_lowercase()
            );
        }
    }

    if lower.contains("side effect") {
        "Common side effects are often mild. However, if you experience severe reactions \
         like difficulty breathing, a severe rash, or swelling, please contact your doctor \
         or emergency services immediately."
            .to_string()
    } else if lower.contains("when") || lower.contains("time") {
        "You can see the specific timings for each medication listed above. Sticking to \
         this schedule is important for the best results."
            .to_string()
    } else if lower.contains("hello") || lower.contains("hi") {
        "Hello! How can I help you with your medications today?".to_string()
    } else {
        let names = medications
            .iter()
            .map(|med| med.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let example = medications
            .first()
            .map(|med| med.name.as_str())
            .unwrap_or("Amoxicillin");
        format!(
            "I can provide information about your prescribed medications: {names}. \
             Try asking \"what is {example} for?\""
        )
    }
}

/// Answer one user message, preferring the model and degrading to the
/// rule-based replies when it is absent or fails.
pub fn assistant_reply(
    model: Option<&dyn ConversationalModel>,
    medications: &[Medication],
    message: &str,
) -> String {
    if let Some(model) = model {
        let context = medication_context(medications);
        match model.generate_reply(&context, message) {
            Ok(reply) => return reply,
            Err(error) => {
                warn!(%error, "conversational model failed, using rule-based reply");
            }
        }
    }
    fallback_reply(medications, message)
}
