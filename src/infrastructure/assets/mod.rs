mod pdf_template_store;
mod static_template_store;
mod xlsx_schema_source;

pub use pdf_template_store::PdfTemplateStore;
pub use static_template_store::StaticTemplateStore;
pub use xlsx_schema_source::{StaticSchemaSource, XlsxSchemaSource};
