pub mod assets;
pub mod extraction;
pub mod form;
pub mod llm;
pub mod observability;
pub mod ocr;
