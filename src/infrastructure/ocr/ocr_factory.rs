use std::sync::Arc;

use crate::application::ports::OcrEngine;
use crate::presentation::config::{OcrProvider, OcrSettings};

use super::{AzureOcrEngine, MockOcrEngine};

#[derive(Debug, thiserror::Error)]
pub enum OcrFactoryError {
    #[error("OCR_ENDPOINT is required for the Azure OCR provider")]
    MissingEndpoint,
    #[error("OCR_API_KEY is required for the Azure OCR provider")]
    MissingApiKey,
}

pub struct OcrFactory;

impl OcrFactory {
    pub fn create(settings: &OcrSettings) -> Result<Arc<dyn OcrEngine>, OcrFactoryError> {
        match settings.provider {
            OcrProvider::Azure => {
                let endpoint = settings
                    .endpoint
                    .as_deref()
                    .ok_or(OcrFactoryError::MissingEndpoint)?;
                let api_key = settings
                    .api_key
                    .as_deref()
                    .ok_or(OcrFactoryError::MissingApiKey)?;
                tracing::info!("Using Azure Document Intelligence OCR engine");
                Ok(Arc::new(AzureOcrEngine::new(endpoint, api_key)))
            }
            OcrProvider::Mock => {
                tracing::warn!("Using mock OCR engine; scanned documents will not be read");
                Ok(Arc::new(MockOcrEngine::returning("")))
            }
        }
    }
}
