use std::sync::Arc;

use crate::application::ports::TextExtractor;
use crate::domain::{AggregatedDocument, ExtractionMethod, UploadedFile};

/// Extraction result for one file, keyed by its original filename.
#[derive(Debug, Clone)]
pub struct FileText {
    pub filename: String,
    pub text: String,
}

/// Runs per-file extraction and merges the results into one ordered,
/// labeled document context.
pub struct ExtractionService<E>
where
    E: TextExtractor,
{
    extractor: Arc<E>,
}

impl<E> ExtractionService<E>
where
    E: TextExtractor,
{
    pub fn new(extractor: Arc<E>) -> Self {
        Self { extractor }
    }

    /// Extract every file concurrently, rejoining results in upload order.
    ///
    /// A failing file is absorbed as empty text and logged; it never aborts
    /// the request on its own.
    pub async fn extract_all(&self, files: &[UploadedFile]) -> Vec<FileText> {
        let futures = files.iter().map(|file| async move {
            match self.extractor.extract(file).await {
                Ok(content) => {
                    tracing::debug!(
                        filename = %file.filename,
                        method = ?content.method,
                        chars = content.text.len(),
                        "File extracted"
                    );
                    if content.method == ExtractionMethod::Ocr {
                        tracing::info!(filename = %file.filename, "Text obtained via OCR");
                    }
                    content.text
                }
                Err(e) => {
                    tracing::warn!(filename = %file.filename, error = %e, "File extraction failed; continuing with empty text");
                    String::new()
                }
            }
        });

        // join_all yields results in input order regardless of completion
        // order, which keeps section order equal to upload order.
        let texts = futures::future::join_all(futures).await;

        files
            .iter()
            .zip(texts)
            .map(|(file, text)| FileText {
                filename: file.filename.clone(),
                text,
            })
            .collect()
    }

    /// Build the aggregated document: one section per file in upload order,
    /// then the free-text section if non-blank.
    pub fn aggregate(
        &self,
        contents: Vec<FileText>,
        free_text: Option<&str>,
    ) -> Result<AggregatedDocument, AggregateError> {
        let mut document = AggregatedDocument::new();

        for content in contents {
            document.push_section(format!("Document: {}", content.filename), content.text);
        }

        if let Some(text) = free_text {
            if !text.trim().is_empty() {
                document.push_section("Additional notes", text);
            }
        }

        if document.is_blank() {
            return Err(AggregateError::EmptyInput);
        }

        Ok(document)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    #[error("no extractable content: all files yielded empty text and no free text was supplied")]
    EmptyInput,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::extraction::MockExtractor;

    fn txt_file(name: &str, body: &str) -> UploadedFile {
        UploadedFile::new(name.to_string(), body.as_bytes().to_vec(), 1024).unwrap()
    }

    #[tokio::test]
    async fn given_multiple_files_when_extracting_then_order_matches_upload_order() {
        let service = ExtractionService::new(Arc::new(MockExtractor::echo()));
        let files = vec![txt_file("a.txt", "alpha"), txt_file("b.txt", "bravo")];

        let contents = service.extract_all(&files).await;
        let document = service.aggregate(contents, Some("trailing")).unwrap();

        let labels: Vec<_> = document
            .sections()
            .iter()
            .map(|s| s.label.as_str())
            .collect();
        assert_eq!(
            labels,
            ["Document: a.txt", "Document: b.txt", "Additional notes"]
        );
    }

    #[tokio::test]
    async fn given_failing_file_when_extracting_then_absorbed_as_empty_text() {
        let service = ExtractionService::new(Arc::new(MockExtractor::failing()));
        let files = vec![txt_file("broken.txt", "ignored")];

        let contents = service.extract_all(&files).await;
        assert_eq!(contents.len(), 1);
        assert!(contents[0].text.is_empty());
    }

    #[tokio::test]
    async fn given_no_text_anywhere_when_aggregating_then_empty_input() {
        let service = ExtractionService::new(Arc::new(MockExtractor::failing()));
        let files = vec![txt_file("broken.txt", "ignored")];

        let contents = service.extract_all(&files).await;
        let result = service.aggregate(contents, Some("   "));
        assert!(matches!(result, Err(AggregateError::EmptyInput)));
    }
}
