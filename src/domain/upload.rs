/// Supported upload formats, decided by file extension alone.
///
/// Content sniffing is deliberately not performed: the dispatch contract is
/// "what the filename claims", and a mislabeled file surfaces as a per-file
/// extraction failure rather than a routing surprise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Txt,
    Pdf,
    Png,
    Jpeg,
    Doc,
    Docx,
    Xls,
    Xlsx,
}

impl FileFormat {
    /// Parse the format from a filename's extension, case-insensitively.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = filename.rsplit_once('.').map(|(_, e)| e)?;
        match ext.to_ascii_lowercase().as_str() {
            "txt" => Some(Self::Txt),
            "pdf" => Some(Self::Pdf),
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "doc" => Some(Self::Doc),
            "docx" => Some(Self::Docx),
            "xls" => Some(Self::Xls),
            "xlsx" => Some(Self::Xlsx),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Pdf => "pdf",
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Doc => "doc",
            Self::Docx => "docx",
            Self::Xls => "xls",
            Self::Xlsx => "xlsx",
        }
    }
}

/// One uploaded file, owned by the request and discarded after extraction.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub format: FileFormat,
    pub data: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: String, data: Vec<u8>, max_bytes: usize) -> Result<Self, UploadError> {
        let format = FileFormat::from_filename(&filename)
            .ok_or_else(|| UploadError::UnsupportedFormat(filename.clone()))?;

        if data.len() > max_bytes {
            return Err(UploadError::TooLarge {
                filename,
                size: data.len(),
                max: max_bytes,
            });
        }

        Ok(Self {
            filename,
            format,
            data,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
    #[error("file {filename} is {size} bytes, above the {max} byte limit")]
    TooLarge {
        filename: String,
        size: usize,
        max: usize,
    },
}

/// How a file's text was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMethod {
    Native,
    Ocr,
}

/// Text pulled out of a single uploaded file.
#[derive(Debug, Clone)]
pub struct ExtractedContent {
    pub text: String,
    pub method: ExtractionMethod,
}

impl ExtractedContent {
    pub fn native(text: String) -> Self {
        Self {
            text,
            method: ExtractionMethod::Native,
        }
    }

    pub fn ocr(text: String) -> Self {
        Self {
            text,
            method: ExtractionMethod::Ocr,
        }
    }
}
