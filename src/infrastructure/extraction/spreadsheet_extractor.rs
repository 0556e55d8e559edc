use std::io::Cursor;

use async_trait::async_trait;
use calamine::{open_workbook_from_rs, Data, Reader, Xls, Xlsx};

use crate::application::ports::{TextExtractor, TextExtractorError};
use crate::domain::{ExtractedContent, FileFormat, UploadedFile};

/// Treats spreadsheet *content* files as ordinary text: every sheet in
/// workbook order, each row with at least one non-empty cell rendered as one
/// pipe-delimited line. (The schema spreadsheet is a separate asset and is
/// not handled here.)
pub struct SpreadsheetExtractor;

impl SpreadsheetExtractor {
    fn worksheets(file: &UploadedFile) -> Result<Vec<(String, calamine::Range<Data>)>, TextExtractorError> {
        let cursor = Cursor::new(file.data.clone());
        match file.format {
            FileFormat::Xlsx => {
                let mut workbook: Xlsx<_> = open_workbook_from_rs(cursor).map_err(|e| {
                    TextExtractorError::ExtractionFailed(format!("failed to open xlsx: {e}"))
                })?;
                Ok(workbook.worksheets())
            }
            FileFormat::Xls => {
                let mut workbook: Xls<_> = open_workbook_from_rs(cursor).map_err(|e| {
                    TextExtractorError::ExtractionFailed(format!("failed to open xls: {e}"))
                })?;
                Ok(workbook.worksheets())
            }
            other => Err(TextExtractorError::UnsupportedFormat(
                other.as_str().to_string(),
            )),
        }
    }

    fn render_rows(sheets: &[(String, calamine::Range<Data>)]) -> String {
        let mut lines = Vec::new();
        for (_, range) in sheets {
            for row in range.rows() {
                if row.iter().all(|cell| matches!(cell, Data::Empty)) {
                    continue;
                }
                let line = row
                    .iter()
                    .map(|cell| match cell {
                        Data::Empty => String::new(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(" | ");
                lines.push(line);
            }
        }
        lines.join("\n")
    }
}

#[async_trait]
impl TextExtractor for SpreadsheetExtractor {
    #[tracing::instrument(skip(self, file), fields(filename = %file.filename))]
    async fn extract(&self, file: &UploadedFile) -> Result<ExtractedContent, TextExtractorError> {
        let sheets = Self::worksheets(file)?;
        tracing::debug!(sheet_count = sheets.len(), "Workbook opened");

        Ok(ExtractedContent::native(Self::render_rows(&sheets)))
    }
}
