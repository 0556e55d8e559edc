use async_trait::async_trait;

use crate::application::ports::{TextExtractor, TextExtractorError};
use crate::domain::{ExtractedContent, UploadedFile};

/// Test double: echoes file bytes back as text, or fails every call.
pub struct MockExtractor {
    fail: bool,
}

impl MockExtractor {
    pub fn echo() -> Self {
        Self { fail: false }
    }

    pub fn failing() -> Self {
        Self { fail: true }
    }
}

#[async_trait]
impl TextExtractor for MockExtractor {
    async fn extract(&self, file: &UploadedFile) -> Result<ExtractedContent, TextExtractorError> {
        if self.fail {
            return Err(TextExtractorError::ExtractionFailed(
                "mock extractor configured to fail".to_string(),
            ));
        }

        Ok(ExtractedContent::native(
            String::from_utf8_lossy(&file.data).into_owned(),
        ))
    }
}
