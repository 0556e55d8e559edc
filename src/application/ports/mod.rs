mod form_template;
mod llm_client;
mod ocr_engine;
mod schema_source;
mod text_extractor;

pub use form_template::{FormError, FormTemplate, TemplateStore};
pub use llm_client::{LlmClient, LlmClientError};
pub use ocr_engine::{OcrEngine, OcrError};
pub use schema_source::{SchemaSource, SchemaSourceError};
pub use text_extractor::{TextExtractor, TextExtractorError};
