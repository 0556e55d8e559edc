use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::application::ports::{FormError, FormTemplate, TemplateStore};
use crate::infrastructure::form::AcroFormTemplate;

/// Template asset loader: reads the fillable PDF once, keeps the immutable
/// bytes process-wide, and parses a fresh working copy per request.
pub struct PdfTemplateStore {
    path: PathBuf,
    cache: RwLock<Option<Arc<Vec<u8>>>>,
}

impl PdfTemplateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RwLock::new(None),
        }
    }

    fn bytes(&self) -> Result<Arc<Vec<u8>>, FormError> {
        if let Some(bytes) = self.cache.read().expect("lock poisoned").as_ref() {
            return Ok(Arc::clone(bytes));
        }

        let bytes = Arc::new(
            std::fs::read(&self.path).map_err(|e| {
                FormError::ReadFailed(format!("{}: {e}", self.path.display()))
            })?,
        );
        tracing::info!(bytes = bytes.len(), path = %self.path.display(), "Form template loaded");

        let mut cache = self.cache.write().expect("lock poisoned");
        Ok(Arc::clone(cache.get_or_insert(bytes)))
    }
}

impl TemplateStore for PdfTemplateStore {
    fn open(&self) -> Result<Box<dyn FormTemplate>, FormError> {
        let bytes = self.bytes()?;
        Ok(Box::new(AcroFormTemplate::from_bytes(&bytes)?))
    }

    fn invalidate(&self) {
        *self.cache.write().expect("lock poisoned") = None;
    }
}
