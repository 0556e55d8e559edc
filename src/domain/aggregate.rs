/// One labeled block of extracted text inside the aggregated document.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub label: String,
    pub text: String,
}

/// The full document context handed to the extraction prompt.
///
/// Section order is part of the contract: it equals upload order, with the
/// optional free-text section last, so the prompt the extraction service sees
/// is deterministic for a given request.
#[derive(Debug, Clone, Default)]
pub struct AggregatedDocument {
    sections: Vec<Section>,
}

impl AggregatedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_section(&mut self, label: impl Into<String>, text: impl Into<String>) {
        self.sections.push(Section {
            label: label.into(),
            text: text.into(),
        });
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// True when no section carries any non-whitespace text.
    pub fn is_blank(&self) -> bool {
        self.sections.iter().all(|s| s.text.trim().is_empty())
    }

    /// Render the document as one labeled string, in section order.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            if !out.is_empty() {
                out.push_str("\n\n");
            }
            out.push_str("===== ");
            out.push_str(&section.label);
            out.push_str(" =====\n");
            out.push_str(section.text.trim());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_sections_when_rendering_then_order_is_preserved() {
        let mut doc = AggregatedDocument::new();
        doc.push_section("Document: a.txt", "alpha");
        doc.push_section("Document: b.txt", "bravo");
        doc.push_section("Additional notes", "charlie");

        let rendered = doc.render();
        let a = rendered.find("alpha").unwrap();
        let b = rendered.find("bravo").unwrap();
        let c = rendered.find("charlie").unwrap();
        assert!(a < b && b < c);
        assert!(rendered.contains("===== Document: a.txt ====="));
    }

    #[test]
    fn given_only_whitespace_sections_when_checking_then_blank() {
        let mut doc = AggregatedDocument::new();
        doc.push_section("Document: empty.txt", "  \n\t ");
        assert!(doc.is_blank());
    }
}
