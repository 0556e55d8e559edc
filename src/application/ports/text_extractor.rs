use async_trait::async_trait;

use crate::domain::{ExtractedContent, UploadedFile};

/// Produces text from one uploaded file using a format-specific method.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, file: &UploadedFile) -> Result<ExtractedContent, TextExtractorError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TextExtractorError {
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("ocr failed: {0}")]
    OcrFailed(String),
}
