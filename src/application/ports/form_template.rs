use crate::domain::FieldKind;

/// One request's working copy of the fillable template.
///
/// Field types are probed up front from the template's own metadata and
/// dispatched through [`FieldKind`]; setters fail with an error instead of
/// silently mutating a field of the wrong type.
pub trait FormTemplate: Send {
    /// Declared type of the field identified by `key`, or `Unknown` when the
    /// template has no such field.
    fn field_kind(&self, key: &str) -> FieldKind;

    fn set_text(&mut self, key: &str, value: &str) -> Result<(), FormError>;

    fn set_checkbox(&mut self, key: &str, checked: bool) -> Result<(), FormError>;

    /// Select the option whose export value exactly equals `option`.
    fn select_radio(&mut self, key: &str, option: &str) -> Result<(), FormError>;

    /// Bake all values into static appearance and remove interactivity.
    /// Irreversible; must run exactly once, after the fill loop completes.
    fn flatten(&mut self) -> Result<(), FormError>;

    /// Serialize the final document.
    fn into_bytes(self: Box<Self>) -> Result<Vec<u8>, FormError>;
}

/// Supplier of fresh template instances backed by the read-only template asset.
pub trait TemplateStore: Send + Sync {
    fn open(&self) -> Result<Box<dyn FormTemplate>, FormError>;

    fn invalidate(&self);
}

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("failed to read template asset: {0}")]
    ReadFailed(String),
    #[error("template is not a fillable document: {0}")]
    NotFillable(String),
    #[error("no field named {0}")]
    NoSuchField(String),
    #[error("field {key} is not a {expected}")]
    WrongKind { key: String, expected: &'static str },
    #[error("field {key} has no option matching {option:?}")]
    NoSuchOption { key: String, option: String },
    #[error("template already flattened")]
    AlreadyFlattened,
    #[error("render failed: {0}")]
    RenderFailed(String),
}
