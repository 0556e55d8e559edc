mod composite_extractor;
mod image_extractor;
mod mock_extractor;
mod pdf_extractor;
mod plain_text_extractor;
mod spreadsheet_extractor;
mod text_sanitizer;
mod word_extractor;

pub use composite_extractor::CompositeExtractor;
pub use image_extractor::ImageExtractor;
pub use mock_extractor::MockExtractor;
pub use pdf_extractor::{PdfExtractor, OCR_ESCALATION_THRESHOLD};
pub use plain_text_extractor::PlainTextExtractor;
pub use spreadsheet_extractor::SpreadsheetExtractor;
pub use text_sanitizer::clean_extracted_text;
pub use word_extractor::WordExtractor;
