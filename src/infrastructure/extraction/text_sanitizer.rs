use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static WRAP_HYPHEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<a>\w)-[ \t]*\r?\n[ \t]*(?P<b>\w)").unwrap());

/// Clean up text coming out of an extractor before aggregation: NFKC
/// normalization, re-joining of hyphenated line wraps, and whitespace
/// collapse, while keeping paragraph breaks.
pub fn clean_extracted_text(raw: &str) -> String {
    let normalized: String = raw.nfkc().collect();
    let joined = WRAP_HYPHEN.replace_all(&normalized, "$a$b");

    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();

    for line in joined.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(&collapsed);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    paragraphs.join("\n\n")
}
