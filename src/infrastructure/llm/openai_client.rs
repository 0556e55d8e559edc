use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::application::ports::{LlmClient, LlmClientError};

use super::envelope;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI Responses API adapter. One blocking-from-the-pipeline's-view call
/// per request; the wait is bounded by the client timeout, not retried.
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: &'a str,
}

impl OpenAiClient {
    pub fn new(api_key: String, model: String, base_url: Option<String>, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("reqwest client build never fails with default TLS config");
        Self {
            client,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            api_key,
            model,
        }
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    #[tracing::instrument(skip(self, prompt), fields(model = %self.model, prompt_chars = prompt.len()))]
    async fn extract_fields(&self, prompt: &str) -> Result<String, LlmClientError> {
        let url = format!("{}/responses", self.base_url);
        let request = ResponsesRequest {
            model: &self.model,
            input: prompt,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmClientError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status, "Extraction service returned an error status");
            return Err(LlmClientError::UpstreamStatus { status, body });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| LlmClientError::RequestFailed(format!("bad response body: {e}")))?;

        let answer = envelope::first_output_text(&body).ok_or(LlmClientError::EmptyOutput)?;
        tracing::debug!(answer_chars = answer.len(), "Extraction answer received");
        Ok(answer)
    }
}
