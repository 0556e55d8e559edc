//! Closed-set parser for the extraction service's response envelope.
//!
//! The envelope shape differs across service versions, so the answer text is
//! located by recognizing a fixed set of known shapes, in order. An
//! unrecognized shape fails deterministically instead of probing unboundedly.

use serde_json::Value;

/// Locate the first text-bearing content item in a response envelope.
///
/// Recognized shapes:
/// 1. Responses API: `output[].content[].text` where the item is typed
///    `output_text` (or carries a plain `text` string).
/// 2. Convenience field: top-level `output_text` string.
/// 3. Chat Completions: `choices[].message.content` string.
pub fn first_output_text(envelope: &Value) -> Option<String> {
    if let Some(text) = responses_output_text(envelope) {
        return Some(text);
    }

    if let Some(text) = envelope.get("output_text").and_then(Value::as_str) {
        if !text.is_empty() {
            return Some(text.to_string());
        }
    }

    chat_completion_text(envelope)
}

fn responses_output_text(envelope: &Value) -> Option<String> {
    let output = envelope.get("output")?.as_array()?;
    for item in output {
        let Some(content) = item.get("content").and_then(Value::as_array) else {
            continue;
        };
        for part in content {
            let typed_text = part.get("type").and_then(Value::as_str) == Some("output_text");
            if let Some(text) = part.get("text").and_then(Value::as_str) {
                if typed_text || !text.is_empty() {
                    return Some(text.to_string());
                }
            }
        }
    }
    None
}

fn chat_completion_text(envelope: &Value) -> Option<String> {
    let choices = envelope.get("choices")?.as_array()?;
    for choice in choices {
        if let Some(text) = choice
            .get("message")
            .and_then(|m| m.get("content"))
            .and_then(Value::as_str)
        {
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }
    None
}
