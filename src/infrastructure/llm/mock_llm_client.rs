use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{LlmClient, LlmClientError};

/// Test double returning a canned answer and remembering the last prompt.
pub struct MockLlmClient {
    answer: Result<String, String>,
    last_prompt: Mutex<Option<String>>,
}

impl MockLlmClient {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Ok(answer.to_string()),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            answer: Err(message.to_string()),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().expect("mutex poisoned").clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn extract_fields(&self, prompt: &str) -> Result<String, LlmClientError> {
        *self.last_prompt.lock().expect("mutex poisoned") = Some(prompt.to_string());
        match &self.answer {
            Ok(answer) => Ok(answer.clone()),
            Err(message) => Err(LlmClientError::RequestFailed(message.clone())),
        }
    }
}
