pub mod answer;
mod extraction_service;
mod fill_service;
mod processing_service;
mod prompt_builder;

pub use extraction_service::{AggregateError, ExtractionService, FileText};
pub use fill_service::{FillService, STRATEGY_ORDER, TRUTHY_TOKENS};
pub use processing_service::{ProcessError, ProcessingService};
pub use prompt_builder::PromptBuilder;
