//! Discharge-document processing: upload gating, text extraction, and
//! regimen assembly.

use tracing::{debug, info};

use crate::models::Medication;
use crate::pipeline::dedup::dedup_regimen;
use crate::pipeline::extraction::{validate_upload, TextExtractor};
use crate::pipeline::frequency::{extract_purpose, normalize_frequency};
use crate::pipeline::scanner::{normalize_text, scan_medications};
use crate::pipeline::UploadError;

/// Parse already-extracted discharge text into a deduplicated regimen.
///
/// An empty result is valid: text with no recognizable medication lines
/// simply produces an empty list.
pub fn parse_discharge_text(text: &str) -> Vec<Medication> {
    let normalized = normalize_text(text);
    let candidates = scan_medications(&normalized);
    debug!(count = candidates.len(), "scanned medication candidates");

    let medications = candidates
        .into_iter()
        .map(|found| {
            let frequency = normalize_frequency(&found.descriptor);
            let purpose = extract_purpose(&found.descriptor);
            Medication::new(
                found.name,
                found.dosage,
                frequency.label,
                frequency.time_slots,
                purpose,
            )
        })
        .collect();

    dedup_regimen(medications)
}

/// Full upload path: gate the file, extract its text, parse the regimen.
pub fn process_document(
    extractor: &dyn TextExtractor,
    bytes: &[u8],
    media_type: &str,
) -> Result<Vec<Medication>, UploadError> {
    validate_upload(media_type, bytes.len() as u64)?;

    let text = extractor.extract_text(bytes)?;
    let medications = parse_discharge_text(&text);
    info!(
        medications = medications.len(),
        bytes = bytes.len(),
        "processed discharge document"
    );
    Ok(medications)
}
