/// Declared type of a template field, discovered by probing its metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    CheckBox,
    RadioGroup,
    /// Present in the template but of a type no fill strategy handles.
    Unknown,
}

/// The fill strategy that ended up writing a value, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillStrategy {
    Text,
    Checkbox,
    Radio,
    None,
}

/// Terminal fill state for one mapping key.
#[derive(Debug, Clone, PartialEq)]
pub struct FillOutcome {
    pub key: String,
    pub filled: bool,
    pub strategy: FillStrategy,
}

impl FillOutcome {
    pub fn filled(key: impl Into<String>, strategy: FillStrategy) -> Self {
        Self {
            key: key.into(),
            filled: true,
            strategy,
        }
    }

    pub fn unfilled(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            filled: false,
            strategy: FillStrategy::None,
        }
    }
}

/// Per-request fill accounting. Every normalized key gets exactly one entry;
/// nothing is silently dropped.
#[derive(Debug, Default)]
pub struct FillReport {
    outcomes: Vec<FillOutcome>,
}

impl FillReport {
    pub fn record(&mut self, outcome: FillOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[FillOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn filled_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.filled).count()
    }

    pub fn unfilled_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.filled).count()
    }
}
