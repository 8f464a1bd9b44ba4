use std::str::FromStr;

use bytes::Bytes;
use mime::Mime;

use crate::formats::ConversionPair;

/// A validated upload, owned by one request for the duration of the call.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub content: Bytes,
    pub filename: String,
    pub pair: ConversionPair,
    pub options: RenderOptions,
}

/// The produced document: bytes plus the response metadata the HTTP layer
/// needs to stream it back as a download.
#[derive(Debug, Clone)]
pub struct ConversionResult {
    pub content: Vec<u8>,
    pub content_type: Mime,
    pub filename: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    A4,
    Letter,
    Legal,
}

impl PageSize {
    /// Portrait dimensions in PDF points.
    pub fn dimensions(&self) -> (i64, i64) {
        match self {
            PageSize::A4 => (595, 842),
            PageSize::Letter => (612, 792),
            PageSize::Legal => (612, 1008),
        }
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<PageSize, String> {
        match s.to_ascii_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::Letter),
            "legal" => Ok(PageSize::Legal),
            other => Err(format!("unknown page size '{}', expected one of: A4, letter, legal", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Orientation, String> {
        match s.to_ascii_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            other => Err(format!("unknown orientation '{}', expected portrait or landscape", other)),
        }
    }
}

/// Page layout options for PDF-producing conversions, taken from optional
/// multipart form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub page_size: PageSize,
    pub orientation: Orientation,
    pub margin_mm: u32,
}

impl RenderOptions {
    /// Page width and height in points, orientation applied.
    pub fn page_dimensions(&self) -> (i64, i64) {
        let (width, height) = self.page_size.dimensions();
        match self.orientation {
            Orientation::Portrait => (width, height),
            Orientation::Landscape => (height, width),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            margin_mm: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_parses_case_insensitively() {
        assert_eq!("A4".parse::<PageSize>().unwrap(), PageSize::A4);
        assert_eq!("letter".parse::<PageSize>().unwrap(), PageSize::Letter);
        assert_eq!("LEGAL".parse::<PageSize>().unwrap(), PageSize::Legal);
        assert!("tabloid".parse::<PageSize>().is_err());
    }

    #[test]
    fn landscape_swaps_dimensions() {
        let options = RenderOptions {
            orientation: Orientation::Landscape,
            ..RenderOptions::default()
        };
        assert_eq!(options.page_dimensions(), (842, 595));
    }
}
