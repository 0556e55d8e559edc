use async_trait::async_trait;

use crate::application::ports::{TextExtractor, TextExtractorError};
use crate::domain::{ExtractedContent, FileFormat, UploadedFile};

pub struct PlainTextExtractor;

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, file: &UploadedFile) -> Result<ExtractedContent, TextExtractorError> {
        if file.format != FileFormat::Txt {
            return Err(TextExtractorError::UnsupportedFormat(
                file.format.as_str().to_string(),
            ));
        }

        let text = String::from_utf8(file.data.clone())
            .map_err(|e| TextExtractorError::ExtractionFailed(format!("not valid UTF-8: {e}")))?;

        Ok(ExtractedContent::native(text))
    }
}
