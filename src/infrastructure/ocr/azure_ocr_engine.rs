use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{OcrEngine, OcrError};

pub const POLL_TIMEOUT: Duration = Duration::from_secs(180);
pub const INITIAL_BACKOFF: Duration = Duration::from_secs(2);
pub const MAX_BACKOFF: Duration = Duration::from_secs(30);
pub const API_VERSION: &str = "2024-11-30";

/// Azure Document Intelligence `prebuilt-read` adapter: submit the byte
/// payload, then poll the returned operation until recognition finishes.
pub struct AzureOcrEngine {
    client: Client,
    endpoint: String,
    api_key: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeResponse {
    status: String,
    analyze_result: Option<AnalyzeResult>,
}

#[derive(Deserialize)]
struct AnalyzeResult {
    content: String,
}

impl AzureOcrEngine {
    pub fn new(endpoint: &str, api_key: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("reqwest client build never fails with default TLS config");
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    async fn submit(&self, data: &[u8]) -> Result<String, OcrError> {
        let body = serde_json::json!({
            "base64Source": general_purpose::STANDARD.encode(data),
        });
        let url = format!(
            "{}/documentintelligence/documentModels/prebuilt-read:analyze?api-version={}",
            self.endpoint, API_VERSION
        );

        let response = self
            .client
            .post(&url)
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| OcrError::RequestFailed(format!("submit failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(OcrError::UpstreamStatus { status, body });
        }

        response
            .headers()
            .get("Operation-Location")
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .ok_or_else(|| {
                OcrError::RequestFailed("response missing Operation-Location header".to_string())
            })
    }

    async fn poll_until_complete(&self, operation_url: &str) -> Result<String, OcrError> {
        let poll = async {
            let mut backoff = INITIAL_BACKOFF;

            loop {
                let response = self
                    .client
                    .get(operation_url)
                    .header("Ocp-Apim-Subscription-Key", &self.api_key)
                    .send()
                    .await
                    .map_err(|e| OcrError::RequestFailed(format!("poll failed: {e}")))?;

                if !response.status().is_success() {
                    let status = response.status().as_u16();
                    let body = response.text().await.unwrap_or_default();
                    return Err(OcrError::UpstreamStatus { status, body });
                }

                let result: AnalyzeResponse = response
                    .json()
                    .await
                    .map_err(|e| OcrError::RequestFailed(format!("bad poll body: {e}")))?;

                match result.status.as_str() {
                    "succeeded" => {
                        return Ok(result
                            .analyze_result
                            .map(|r| r.content)
                            .unwrap_or_default());
                    }
                    "failed" => {
                        return Err(OcrError::RequestFailed(
                            "document analysis reported failure".to_string(),
                        ));
                    }
                    _ => {
                        tokio::time::sleep(backoff).await;
                        backoff = (backoff * 2).min(MAX_BACKOFF);
                    }
                }
            }
        };

        tokio::time::timeout(POLL_TIMEOUT, poll)
            .await
            .map_err(|_| OcrError::TimedOut(POLL_TIMEOUT.as_secs()))?
    }
}

#[async_trait]
impl OcrEngine for AzureOcrEngine {
    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    async fn recognize(&self, data: &[u8]) -> Result<String, OcrError> {
        let operation_url = self.submit(data).await?;
        tracing::debug!("OCR submitted; polling for result");
        let content = self.poll_until_complete(&operation_url).await?;
        tracing::info!(chars = content.len(), "OCR complete");
        Ok(content)
    }
}
