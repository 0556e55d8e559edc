mod azure_ocr_engine;
mod mock_ocr_engine;
mod ocr_factory;

pub use azure_ocr_engine::AzureOcrEngine;
pub use mock_ocr_engine::MockOcrEngine;
pub use ocr_factory::{OcrFactory, OcrFactoryError};
