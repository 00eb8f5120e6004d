//! Text extraction from uploaded files

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Supported upload file types, detected from the filename extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Plain text (.txt)
    Text,
    /// PDF document (.pdf)
    Pdf,
    /// Audio recording (.wav, .webm, .mp3, .m4a, .ogg)
    Audio,
    /// Anything else
    Unknown,
}

impl FileType {
    /// Detect file type from a filename
    pub fn from_filename(filename: &str) -> Self {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "txt" => Self::Text,
            "pdf" => Self::Pdf,
            "wav" | "webm" | "mp3" | "m4a" | "ogg" => Self::Audio,
            _ => Self::Unknown,
        }
    }
}

/// Extract plain text from an uploaded file.
///
/// Text files are decoded as UTF-8 (lossily, so partially valid files still
/// yield their readable content). PDFs go through `pdf-extract`. Anything else
/// is rejected with `Error::UnsupportedFileType`.
pub fn extract_text(filename: &str, data: &[u8]) -> Result<String> {
    match FileType::from_filename(filename) {
        FileType::Text => Ok(String::from_utf8_lossy(data).into_owned()),
        FileType::Pdf => pdf_extract::extract_text_from_mem(data)
            .map_err(|e| Error::file_parse(filename, e.to_string())),
        FileType::Audio | FileType::Unknown => {
            let ext = Path::new(filename)
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("(none)");
            Err(Error::UnsupportedFileType(ext.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_detection() {
        assert_eq!(FileType::from_filename("notes.txt"), FileType::Text);
        assert_eq!(FileType::from_filename("Statement.PDF"), FileType::Pdf);
        assert_eq!(FileType::from_filename("memo.webm"), FileType::Audio);
        assert_eq!(FileType::from_filename("archive.zip"), FileType::Unknown);
        assert_eq!(FileType::from_filename("no_extension"), FileType::Unknown);
    }

    #[test]
    fn test_extract_plain_text() {
        let text = extract_text("notes.txt", "hello world".as_bytes()).unwrap();
        assert_eq!(text, "hello world");
    }

    #[test]
    fn test_unsupported_type_is_error() {
        let err = extract_text("image.png", &[0u8; 4]).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFileType(_)));
    }
}
