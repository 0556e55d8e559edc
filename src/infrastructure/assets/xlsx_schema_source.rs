use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use calamine::{open_workbook, Data, Reader, Xlsx};

use crate::application::ports::{SchemaSource, SchemaSourceError};
use crate::domain::{FieldSchema, SchemaField};

/// Schema asset reader: first worksheet of an xlsx with a header row and
/// three columns (display name, mapping key, instruction). Row order defines
/// prompt order; rows with a blank mapping key are skipped.
///
/// The parsed schema is cached process-wide after the first load; the asset
/// is read-only by contract, so concurrent requests share the copy freely.
pub struct XlsxSchemaSource {
    path: PathBuf,
    cache: RwLock<Option<Arc<FieldSchema>>>,
}

impl XlsxSchemaSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RwLock::new(None),
        }
    }

    fn read_asset(&self) -> Result<FieldSchema, SchemaSourceError> {
        let mut workbook: Xlsx<_> = open_workbook(&self.path)
            .map_err(|e: calamine::XlsxError| SchemaSourceError::ReadFailed(e.to_string()))?;

        let sheets = workbook.worksheets();
        let (sheet_name, range) = sheets
            .first()
            .ok_or_else(|| SchemaSourceError::Malformed("workbook has no sheets".to_string()))?;
        tracing::debug!(sheet = %sheet_name, rows = range.height(), "Reading schema sheet");

        let mut fields = Vec::new();
        for row in range.rows().skip(1) {
            let mapping_key = match row.get(1).and_then(cell_text) {
                Some(key) => key,
                None => continue,
            };
            fields.push(SchemaField {
                field_name: row.get(0).and_then(cell_text).unwrap_or_default(),
                mapping_key,
                instructions: row.get(2).and_then(cell_text).unwrap_or_default(),
            });
        }

        Ok(FieldSchema::new(fields)?)
    }
}

impl SchemaSource for XlsxSchemaSource {
    fn load(&self) -> Result<Arc<FieldSchema>, SchemaSourceError> {
        if let Some(schema) = self.cache.read().expect("lock poisoned").as_ref() {
            return Ok(Arc::clone(schema));
        }

        let schema = Arc::new(self.read_asset()?);
        tracing::info!(fields = schema.len(), "Field schema loaded");

        let mut cache = self.cache.write().expect("lock poisoned");
        // Another request may have loaded concurrently; both copies are
        // identical because the asset is immutable.
        Ok(Arc::clone(cache.get_or_insert(schema)))
    }

    fn invalidate(&self) {
        *self.cache.write().expect("lock poisoned") = None;
    }
}

fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty => return None,
        Data::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Test double serving a pre-built schema.
pub struct StaticSchemaSource {
    schema: Arc<FieldSchema>,
}

impl StaticSchemaSource {
    pub fn new(schema: FieldSchema) -> Self {
        Self {
            schema: Arc::new(schema),
        }
    }
}

impl SchemaSource for StaticSchemaSource {
    fn load(&self) -> Result<Arc<FieldSchema>, SchemaSourceError> {
        Ok(Arc::clone(&self.schema))
    }

    fn invalidate(&self) {}
}
