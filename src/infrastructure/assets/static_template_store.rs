use crate::application::ports::{FormError, FormTemplate, TemplateStore};
use crate::infrastructure::form::AcroFormTemplate;

/// Test double serving a template from in-memory bytes.
pub struct StaticTemplateStore {
    bytes: Vec<u8>,
}

impl StaticTemplateStore {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl TemplateStore for StaticTemplateStore {
    fn open(&self) -> Result<Box<dyn FormTemplate>, FormError> {
        Ok(Box::new(AcroFormTemplate::from_bytes(&self.bytes)?))
    }

    fn invalidate(&self) {}
}
