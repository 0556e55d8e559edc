//! Strict parsing and normalization of the extraction service's answer.

use serde_json::{Map, Value};

#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    #[error("answer is not a well-formed JSON object")]
    NotAnObject,
}

/// Parse the answer text as a single JSON object.
///
/// A markdown code fence around the object is tolerated, since models wrap
/// JSON that way despite instructions; any other deviation is an error.
pub fn parse_object(raw: &str) -> Result<Map<String, Value>, AnswerError> {
    let stripped = strip_code_fence(raw.trim());
    match serde_json::from_str::<Value>(stripped) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(AnswerError::NotAnObject),
    }
}

/// Drop entries whose value is null, the empty string, or blank.
///
/// An empty or missing value must never overwrite a template's default
/// state, so only confident values survive to the fill stage.
pub fn normalize(values: Map<String, Value>) -> Map<String, Value> {
    values
        .into_iter()
        .filter(|(_, value)| match value {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        })
        .collect()
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Skip an optional language tag on the opening fence line.
    let rest = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
