use std::fmt;
use std::path::Path;

use mime::Mime;
use serde::{Deserialize, Serialize};

static DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// The closed set of document formats the service knows about. Conversions
/// are keyed on these variants rather than on extension strings, so an
/// unhandled pair is a compile-time hole instead of a runtime typo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Docx,
    Txt,
    Pdf,
}

impl DocumentFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Docx => "docx",
            DocumentFormat::Txt => "txt",
            DocumentFormat::Pdf => "pdf",
        }
    }

    /// Upload extensions accepted when this format is declared as the source.
    pub fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            DocumentFormat::Docx => &["docx"],
            DocumentFormat::Txt => &["txt"],
            DocumentFormat::Pdf => &["pdf"],
        }
    }

    pub fn content_type(&self) -> Mime {
        match self {
            DocumentFormat::Pdf => mime::APPLICATION_PDF,
            DocumentFormat::Txt => mime::TEXT_PLAIN,
            DocumentFormat::Docx => DOCX_MIME.parse().unwrap_or(mime::APPLICATION_OCTET_STREAM),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// One supported conversion: (source format, target format).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConversionPair {
    pub source: DocumentFormat,
    pub target: DocumentFormat,
}

impl ConversionPair {
    pub const fn new(source: DocumentFormat, target: DocumentFormat) -> ConversionPair {
        ConversionPair { source, target }
    }
}

impl fmt::Display for ConversionPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// Derive the download filename from the uploaded one: keep the stem, swap
/// the extension for the target format's.
pub fn output_filename(input: &str, target: DocumentFormat) -> String {
    let stem = Path::new(input)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("converted");
    format!("{}.{}", stem, target.extension())
}
