use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{OcrEngine, TextExtractor, TextExtractorError};
use crate::domain::{ExtractedContent, FileFormat, UploadedFile};

use super::text_sanitizer::clean_extracted_text;

/// Raster images carry no text layer; they always go through OCR.
pub struct ImageExtractor {
    ocr: Arc<dyn OcrEngine>,
}

impl ImageExtractor {
    pub fn new(ocr: Arc<dyn OcrEngine>) -> Self {
        Self { ocr }
    }
}

#[async_trait]
impl TextExtractor for ImageExtractor {
    #[tracing::instrument(skip(self, file), fields(filename = %file.filename))]
    async fn extract(&self, file: &UploadedFile) -> Result<ExtractedContent, TextExtractorError> {
        if !matches!(file.format, FileFormat::Png | FileFormat::Jpeg) {
            return Err(TextExtractorError::UnsupportedFormat(
                file.format.as_str().to_string(),
            ));
        }

        let recognized = self
            .ocr
            .recognize(&file.data)
            .await
            .map_err(|e| TextExtractorError::OcrFailed(e.to_string()))?;

        Ok(ExtractedContent::ocr(clean_extracted_text(&recognized)))
    }
}
