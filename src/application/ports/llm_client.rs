use async_trait::async_trait;

/// The external extraction capability: one prompt in, one textual answer out.
///
/// Exactly one request per pipeline run; no retries, no streaming.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn extract_fields(&self, prompt: &str) -> Result<String, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    /// Transport-level failure reaching the service.
    #[error("extraction service request failed: {0}")]
    RequestFailed(String),
    /// The service answered with a non-success HTTP status.
    #[error("extraction service returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },
    /// A response arrived but no text-bearing content item was found in it.
    #[error("extraction service response carried no text content")]
    EmptyOutput,
}
