use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{OcrEngine, TextExtractor, TextExtractorError};
use crate::domain::{ExtractedContent, FileFormat, UploadedFile};

use super::{ImageExtractor, PdfExtractor, PlainTextExtractor, SpreadsheetExtractor, WordExtractor};

/// Per-format dispatch table over the concrete extractors.
pub struct CompositeExtractor {
    extractors: HashMap<FileFormat, Arc<dyn TextExtractor>>,
}

impl CompositeExtractor {
    pub fn new(extractors: Vec<(FileFormat, Arc<dyn TextExtractor>)>) -> Self {
        Self {
            extractors: extractors.into_iter().collect(),
        }
    }

    /// The full dispatch table from the format contract, wired to one OCR
    /// engine shared by the PDF-escalation and image paths.
    pub fn with_defaults(ocr: Arc<dyn OcrEngine>) -> Self {
        let pdf: Arc<dyn TextExtractor> = Arc::new(PdfExtractor::new(Arc::clone(&ocr)));
        let image: Arc<dyn TextExtractor> = Arc::new(ImageExtractor::new(ocr));
        let word: Arc<dyn TextExtractor> = Arc::new(WordExtractor);
        let sheet: Arc<dyn TextExtractor> = Arc::new(SpreadsheetExtractor);

        Self::new(vec![
            (FileFormat::Txt, Arc::new(PlainTextExtractor)),
            (FileFormat::Pdf, pdf),
            (FileFormat::Png, Arc::clone(&image)),
            (FileFormat::Jpeg, image),
            (FileFormat::Doc, Arc::clone(&word)),
            (FileFormat::Docx, word),
            (FileFormat::Xls, Arc::clone(&sheet)),
            (FileFormat::Xlsx, sheet),
        ])
    }
}

#[async_trait]
impl TextExtractor for CompositeExtractor {
    async fn extract(&self, file: &UploadedFile) -> Result<ExtractedContent, TextExtractorError> {
        let extractor = self.extractors.get(&file.format).ok_or_else(|| {
            TextExtractorError::UnsupportedFormat(file.format.as_str().to_string())
        })?;

        extractor.extract(file).await
    }
}
