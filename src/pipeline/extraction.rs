use thiserror::Error;

use super::UploadError;
use crate::config;

/// Why the extraction adapter could not produce text.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("document is corrupted or image-only; no text layer could be read")]
    Corrupted,

    #[error("document format is not supported for text extraction")]
    Unsupported,
}

/// Text extraction boundary (allows mocking for tests).
///
/// Given a document's raw bytes, an implementation returns the full plain
/// text or a typed failure. PDF rendering itself lives outside this crate.
pub trait TextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// Gate an upload before the extractor is ever invoked.
///
/// Media type is checked first, then the 10 MB size ceiling.
pub fn validate_upload(media_type: &str, size: u64) -> Result<(), UploadError> {
    if media_type != config::ACCEPTED_MEDIA_TYPE {
        return Err(UploadError::UnsupportedMediaType(media_type.to_string()));
    }
    if size > config::MAX_UPLOAD_BYTES {
        return Err(UploadError::FileTooLarge {
            size,
            limit: config::MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

/// Mock extractor for testing — returns a configurable outcome.
pub struct MockExtractor {
    outcome: Result<String, ExtractionError>,
}

impl MockExtractor {
    pub fn with_text(text: &str) -> Self {
        Self {
            outcome: Ok(text.to_string()),
        }
    }

    pub fn failing(error: ExtractionError) -> Self {
        Self {
            outcome: Err(error),
        }
    }
}

impl TextExtractor for MockExtractor {
    fn extract_text(&self, _bytes: &[u8]) -> Result<String, ExtractionError> {
        self.outcome.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_within_limit_passes() {
        assert!(validate_upload("application/pdf", 1024).is_ok());
    }

    #[test]
    fn non_pdf_rejected() {
        assert_eq!(
            validate_upload("image/png", 1024).unwrap_err(),
            UploadError::UnsupportedMediaType("image/png".into())
        );
    }

    #[test]
    fn oversized_rejected() {
        let size = config::MAX_UPLOAD_BYTES + 1;
        assert!(matches!(
            validate_upload("application/pdf", size),
            Err(UploadError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn media_type_checked_before_size() {
        // Wrong type on an oversized file reports the type, not the size.
        let err = validate_upload("text/plain", config::MAX_UPLOAD_BYTES * 2).unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedMediaType(_)));
    }

    #[test]
    fn mock_extractor_surfaces_failure() {
        let mock = MockExtractor::failing(ExtractionError::Corrupted);
        assert_eq!(mock.extract_text(b"%PDF").unwrap_err(), ExtractionError::Corrupted);
    }
}
