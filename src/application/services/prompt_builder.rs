use crate::domain::{AggregatedDocument, FieldSchema};

/// Fixed rule block prepended to every extraction request.
const EXTRACTION_RULES: &str = "\
You extract field values from the document below.

Rules:
- Extract a value only if it is explicitly present in the document. Never infer or guess.
- If a field's value is absent from the document, output the empty string for that key.
- Respond with a single JSON object mapping each key to its value, and nothing else.
- A free-text field yields a JSON string. A yes/no field yields a JSON boolean. A single-choice field yields the exact matching option string.";

/// Renders schema, rules, and aggregated document into one deterministic
/// extraction request payload.
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn build(schema: &FieldSchema, document: &AggregatedDocument) -> String {
        format!(
            "{EXTRACTION_RULES}\n\n## Fields\n\n{}\n\n## Document\n\n{}",
            Self::render_schema(schema),
            document.render()
        )
    }

    /// One block per schema field, in list order, blank-line separated.
    fn render_schema(schema: &FieldSchema) -> String {
        schema
            .fields()
            .iter()
            .map(|f| {
                format!(
                    "Field: {}\nKey: {}\nInstructions: {}",
                    f.field_name, f.mapping_key, f.instructions
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
