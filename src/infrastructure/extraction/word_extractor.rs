use std::io::{Cursor, Read};

use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::application::ports::{TextExtractor, TextExtractorError};
use crate::domain::{ExtractedContent, FileFormat, UploadedFile};

use super::text_sanitizer::clean_extracted_text;

/// Structural reader for Word documents: pulls `word/document.xml` out of the
/// OOXML container and walks its text runs. No OCR fallback for this class.
///
/// A legacy binary `.doc` is not a zip container and fails extraction, which
/// the extraction service absorbs per-file.
pub struct WordExtractor;

impl WordExtractor {
    fn read_document_xml(data: &[u8]) -> Result<Vec<u8>, TextExtractorError> {
        let mut archive = ZipArchive::new(Cursor::new(data)).map_err(|e| {
            TextExtractorError::ExtractionFailed(format!("not a Word container: {e}"))
        })?;

        let mut entry = archive.by_name("word/document.xml").map_err(|e| {
            TextExtractorError::ExtractionFailed(format!("missing word/document.xml: {e}"))
        })?;

        let mut xml = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut xml)
            .map_err(|e| TextExtractorError::ExtractionFailed(format!("read failed: {e}")))?;
        Ok(xml)
    }

    /// Collect the text of every `w:t` run, breaking lines at paragraph ends.
    fn walk_text_runs(xml: &[u8]) -> Result<String, TextExtractorError> {
        let mut reader = Reader::from_reader(xml);
        let mut buf = Vec::new();
        let mut out = String::new();
        let mut in_text_run = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_text_run = true,
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"w:t" => in_text_run = false,
                    b"w:p" => out.push('\n'),
                    _ => {}
                },
                Ok(Event::Empty(e)) => match e.name().as_ref() {
                    b"w:br" => out.push('\n'),
                    b"w:tab" => out.push('\t'),
                    _ => {}
                },
                Ok(Event::Text(t)) if in_text_run => {
                    let text = t.unescape().map_err(|e| {
                        TextExtractorError::ExtractionFailed(format!("bad XML text: {e}"))
                    })?;
                    out.push_str(&text);
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(TextExtractorError::ExtractionFailed(format!(
                        "XML parse error: {e}"
                    )));
                }
            }
            buf.clear();
        }

        Ok(out)
    }
}

#[async_trait]
impl TextExtractor for WordExtractor {
    #[tracing::instrument(skip(self, file), fields(filename = %file.filename))]
    async fn extract(&self, file: &UploadedFile) -> Result<ExtractedContent, TextExtractorError> {
        if !matches!(file.format, FileFormat::Doc | FileFormat::Docx) {
            return Err(TextExtractorError::UnsupportedFormat(
                file.format.as_str().to_string(),
            ));
        }

        let xml = Self::read_document_xml(&file.data)?;
        let text = Self::walk_text_runs(&xml)?;

        Ok(ExtractedContent::native(clean_extracted_text(&text)))
    }
}
