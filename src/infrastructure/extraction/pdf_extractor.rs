use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lopdf::Document;

use crate::application::ports::{OcrEngine, TextExtractor, TextExtractorError};
use crate::domain::{ExtractedContent, FileFormat, UploadedFile};

use super::text_sanitizer::clean_extracted_text;

/// A PDF whose visible text layer is at or below this many characters is
/// presumed to be a scanned image and escalates to OCR.
pub const OCR_ESCALATION_THRESHOLD: usize = 50;

const NATIVE_EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Native PDF text-layer extraction with single-shot OCR escalation.
pub struct PdfExtractor {
    ocr: Arc<dyn OcrEngine>,
}

impl PdfExtractor {
    pub fn new(ocr: Arc<dyn OcrEngine>) -> Self {
        Self { ocr }
    }

    fn extract_text_layer(data: &[u8]) -> Result<String, TextExtractorError> {
        let doc = Document::load_mem(data)
            .map_err(|e| TextExtractorError::ExtractionFailed(format!("failed to parse PDF: {e}")))?;

        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        if page_numbers.is_empty() {
            return Ok(String::new());
        }

        // Pages with undecodable content are worth skipping, not failing:
        // a partial text layer still answers the escalation question.
        let mut out = String::new();
        for page in page_numbers {
            match doc.extract_text(&[page]) {
                Ok(text) => {
                    if !out.is_empty() {
                        out.push_str("\n\n");
                    }
                    out.push_str(&text);
                }
                Err(e) => {
                    tracing::debug!(page, error = %e, "Page text extraction failed");
                }
            }
        }

        Ok(out)
    }
}

#[async_trait]
impl TextExtractor for PdfExtractor {
    #[tracing::instrument(skip(self, file), fields(filename = %file.filename))]
    async fn extract(&self, file: &UploadedFile) -> Result<ExtractedContent, TextExtractorError> {
        if file.format != FileFormat::Pdf {
            return Err(TextExtractorError::UnsupportedFormat(
                file.format.as_str().to_string(),
            ));
        }

        let data = file.data.clone();
        let native = tokio::time::timeout(
            NATIVE_EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::extract_text_layer(&data)),
        )
        .await
        .map_err(|_| TextExtractorError::ExtractionFailed("PDF extraction timed out".to_string()))?
        .map_err(|e| TextExtractorError::ExtractionFailed(format!("task join error: {e}")))??;

        let native = clean_extracted_text(&native);

        if native.chars().count() > OCR_ESCALATION_THRESHOLD {
            tracing::debug!(chars = native.len(), "Using native PDF text layer");
            return Ok(ExtractedContent::native(native));
        }

        tracing::info!(
            native_chars = native.len(),
            "Text layer near-empty; escalating to OCR"
        );
        let recognized = self
            .ocr
            .recognize(&file.data)
            .await
            .map_err(|e| TextExtractorError::OcrFailed(e.to_string()))?;

        Ok(ExtractedContent::ocr(clean_extracted_text(&recognized)))
    }
}
