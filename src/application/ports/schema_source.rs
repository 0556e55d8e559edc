use std::sync::Arc;

use crate::domain::{FieldSchema, SchemaError};

/// Read-only supplier of the field schema asset.
///
/// Implementations are expected to load once and hand out an immutable,
/// process-wide copy; `invalidate` is the explicit hook for dropping that
/// cached copy.
pub trait SchemaSource: Send + Sync {
    fn load(&self) -> Result<Arc<FieldSchema>, SchemaSourceError>;

    fn invalidate(&self);
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaSourceError {
    #[error("failed to read schema asset: {0}")]
    ReadFailed(String),
    #[error("schema asset is malformed: {0}")]
    Malformed(String),
    #[error(transparent)]
    Invalid(#[from] SchemaError),
}
