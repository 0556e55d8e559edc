use async_trait::async_trait;

/// External optical character recognition: raster bytes in, text out.
///
/// Calls may take seconds; adapters bound the wait with their own timeouts.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, data: &[u8]) -> Result<String, OcrError>;
}

#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("ocr request failed: {0}")]
    RequestFailed(String),
    #[error("ocr returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },
    #[error("ocr timed out after {0} seconds")]
    TimedOut(u64),
}
