use std::collections::HashSet;

/// One field descriptor from the schema asset.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaField {
    /// Human-facing label, shown to the extraction service for context.
    pub field_name: String,
    /// Stable identifier linking prompt, extraction answer, and template field.
    pub mapping_key: String,
    /// Free-text extraction instructions for this field.
    pub instructions: String,
}

/// Ordered list of schema fields. Order drives prompt rendering.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    fields: Vec<SchemaField>,
}

impl FieldSchema {
    /// Build a schema, rejecting duplicate mapping keys.
    ///
    /// Duplicate keys would make both prompt rendering and fill targeting
    /// ambiguous, so they are refused at load time rather than resolved by
    /// a silent last-wins rule.
    pub fn new(fields: Vec<SchemaField>) -> Result<Self, SchemaError> {
        if fields.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.mapping_key.as_str()) {
                return Err(SchemaError::DuplicateKey(field.mapping_key.clone()));
            }
        }

        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("schema contains no fields")]
    Empty,
    #[error("duplicate mapping key in schema: {0}")]
    DuplicateKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(key: &str) -> SchemaField {
        SchemaField {
            field_name: format!("Field {key}"),
            mapping_key: key.to_string(),
            instructions: String::new(),
        }
    }

    #[test]
    fn given_duplicate_mapping_keys_when_building_then_rejected() {
        let result = FieldSchema::new(vec![field("name"), field("date"), field("name")]);
        assert!(matches!(result, Err(SchemaError::DuplicateKey(k)) if k == "name"));
    }

    #[test]
    fn given_no_fields_when_building_then_rejected() {
        assert!(matches!(FieldSchema::new(vec![]), Err(SchemaError::Empty)));
    }

    #[test]
    fn given_unique_keys_when_building_then_order_is_kept() {
        let schema = FieldSchema::new(vec![field("b"), field("a")]).unwrap();
        let keys: Vec<_> = schema.fields().iter().map(|f| f.mapping_key.as_str()).collect();
        assert_eq!(keys, ["b", "a"]);
    }
}
