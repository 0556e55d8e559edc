use std::sync::Arc;

use crate::application::ports::{
    LlmClient, LlmClientError, SchemaSource, TemplateStore, TextExtractor,
};
use crate::application::services::answer;
use crate::application::services::{ExtractionService, FillService, PromptBuilder};
use crate::domain::UploadedFile;

/// The end-to-end pipeline: extraction → aggregation → prompt → extraction
/// service → normalization → fill → flatten.
///
/// Stages run strictly forward; the client receives either a complete
/// rendered document or an error, never a half-filled one.
pub struct ProcessingService<E, L>
where
    E: TextExtractor,
    L: LlmClient,
{
    extraction: ExtractionService<E>,
    llm_client: Arc<L>,
    schema_source: Arc<dyn SchemaSource>,
    template_store: Arc<dyn TemplateStore>,
}

impl<E, L> ProcessingService<E, L>
where
    E: TextExtractor,
    L: LlmClient,
{
    pub fn new(
        extractor: Arc<E>,
        llm_client: Arc<L>,
        schema_source: Arc<dyn SchemaSource>,
        template_store: Arc<dyn TemplateStore>,
    ) -> Self {
        Self {
            extraction: ExtractionService::new(extractor),
            llm_client,
            schema_source,
            template_store,
        }
    }

    #[tracing::instrument(skip(self, files, free_text), fields(file_count = files.len()))]
    pub async fn process(
        &self,
        files: Vec<UploadedFile>,
        free_text: Option<String>,
    ) -> Result<Vec<u8>, ProcessError> {
        let contents = self.extraction.extract_all(&files).await;
        let document = self
            .extraction
            .aggregate(contents, free_text.as_deref())
            .map_err(|e| ProcessError::BadRequest(e.to_string()))?;

        let schema = self
            .schema_source
            .load()
            .map_err(|e| ProcessError::Internal(format!("schema load failed: {e}")))?;

        let prompt = PromptBuilder::build(&schema, &document);
        tracing::debug!(prompt_chars = prompt.len(), fields = schema.len(), "Extraction prompt built");

        let raw_answer = self
            .llm_client
            .extract_fields(&prompt)
            .await
            .map_err(|e| match e {
                LlmClientError::EmptyOutput => {
                    ProcessError::DataFailure("invalid AI output: no text content in the response".to_string())
                }
                other => ProcessError::ServiceFailure(other.to_string()),
            })?;

        let parsed = answer::parse_object(&raw_answer).map_err(|_| {
            ProcessError::DataFailure(
                "invalid AI output: the answer was not a single JSON object".to_string(),
            )
        })?;
        let values = answer::normalize(parsed);
        tracing::info!(extracted = values.len(), "Extraction answer normalized");

        let mut template = self
            .template_store
            .open()
            .map_err(|e| ProcessError::Internal(format!("template load failed: {e}")))?;

        let report = FillService::fill(template.as_mut(), &values);
        tracing::info!(
            filled = report.filled_count(),
            unfilled = report.unfilled_count(),
            "Fill loop complete"
        );

        // Flatten only after every key has reached a terminal fill state.
        template
            .flatten()
            .map_err(|e| ProcessError::Internal(format!("flatten failed: {e}")))?;

        template
            .into_bytes()
            .map_err(|e| ProcessError::Internal(format!("render failed: {e}")))
    }
}

/// Request-level failure taxonomy, mapped to HTTP statuses at the edge.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("{0}")]
    BadRequest(String),
    #[error("extraction service unavailable: {0}")]
    ServiceFailure(String),
    #[error("{0}")]
    DataFailure(String),
    #[error("internal error: {0}")]
    Internal(String),
}
