pub mod extraction;
pub mod scanner;
pub mod frequency;
pub mod dedup;
pub mod processor;

pub use extraction::*;
pub use scanner::*;
pub use frequency::*;
pub use dedup::*;
pub use processor::*;

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum UploadError {
    #[error("Unsupported media type '{0}': only application/pdf is accepted")]
    UnsupportedMediaType(String),

    #[error("File too large: {size} bytes (limit {limit})")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Text extraction failed: {0}")]
    Extraction(#[from] extraction::ExtractionError),
}
