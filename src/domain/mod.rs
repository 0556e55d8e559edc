mod aggregate;
mod fill;
mod schema;
mod upload;

pub use aggregate::{AggregatedDocument, Section};
pub use fill::{FieldKind, FillOutcome, FillReport, FillStrategy};
pub use schema::{FieldSchema, SchemaError, SchemaField};
pub use upload::{ExtractedContent, ExtractionMethod, FileFormat, UploadError, UploadedFile};
