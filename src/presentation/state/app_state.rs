use std::sync::Arc;

use crate::application::ports::{LlmClient, TextExtractor};
use crate::application::services::ProcessingService;
use crate::presentation::config::Settings;

pub struct AppState<E, L>
where
    E: TextExtractor,
    L: LlmClient,
{
    pub processing_service: Arc<ProcessingService<E, L>>,
    pub settings: Settings,
}

impl<E, L> Clone for AppState<E, L>
where
    E: TextExtractor,
    L: LlmClient,
{
    fn clone(&self) -> Self {
        Self {
            processing_service: Arc::clone(&self.processing_service),
            settings: self.settings.clone(),
        }
    }
}
