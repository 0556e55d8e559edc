use serde_json::{Map, Value};

use crate::application::ports::FormTemplate;
use crate::domain::{FieldKind, FillOutcome, FillReport, FillStrategy};

/// Explicit, documented strategy priority: a key resolvable as more than one
/// field type is always filled by the earliest applicable strategy.
pub const STRATEGY_ORDER: [FillStrategy; 3] = [
    FillStrategy::Text,
    FillStrategy::Checkbox,
    FillStrategy::Radio,
];

/// Value spellings that check a box; anything else clears it.
pub const TRUTHY_TOKENS: [&str; 4] = ["true", "yes", "checked", "1"];

/// Best-effort writer of extracted values into the template.
///
/// Schema and template evolve independently, so a key the template has no
/// field for is recorded as unfilled rather than failing the request.
pub struct FillService;

impl FillService {
    pub fn fill(template: &mut dyn FormTemplate, values: &Map<String, Value>) -> FillReport {
        let mut report = FillReport::default();

        for (key, value) in values {
            let outcome = Self::fill_one(template, key, value);
            match &outcome {
                FillOutcome {
                    filled: true,
                    strategy,
                    ..
                } => tracing::debug!(key = %key, strategy = ?strategy, "Field filled"),
                _ => tracing::debug!(key = %key, "No strategy filled this key"),
            }
            report.record(outcome);
        }

        report
    }

    /// Walk the strategies in priority order; the first success is terminal.
    /// Each strategy is isolated: its failure only advances to the next.
    fn fill_one(template: &mut dyn FormTemplate, key: &str, value: &Value) -> FillOutcome {
        let kind = template.field_kind(key);

        for strategy in STRATEGY_ORDER {
            let attempt = match strategy {
                FillStrategy::Text if kind == FieldKind::Text => {
                    template.set_text(key, &value_as_string(value))
                }
                FillStrategy::Checkbox if kind == FieldKind::CheckBox => {
                    template.set_checkbox(key, is_truthy(&value_as_string(value)))
                }
                FillStrategy::Radio if kind == FieldKind::RadioGroup => {
                    template.select_radio(key, &value_as_string(value))
                }
                _ => continue,
            };

            match attempt {
                Ok(()) => return FillOutcome::filled(key, strategy),
                Err(e) => {
                    tracing::debug!(key = %key, strategy = ?strategy, error = %e, "Fill strategy failed");
                }
            }
        }

        FillOutcome::unfilled(key)
    }
}

/// String form of an extracted value, without JSON quoting.
fn value_as_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &str) -> bool {
    let lowered = value.trim().to_ascii_lowercase();
    TRUTHY_TOKENS.contains(&lowered.as_str())
}
