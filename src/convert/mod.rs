pub mod docx;
pub mod pdf;
pub mod soffice;

use async_trait::async_trait;
use tracing::debug;

use crate::dispatch::Converter;
use crate::error::ConvertError;
use crate::formats::{output_filename, ConversionPair, DocumentFormat};
use crate::models::{ConversionRequest, ConversionResult};

pub use soffice::SofficeDocxToPdf;

/// DOCX to PDF: extract the ordered text blocks, render them as wrapped
/// paragraphs. Plain-text fidelity only; formatting and table geometry are
/// not preserved.
pub struct DocxToPdfConverter;

#[async_trait]
impl Converter for DocxToPdfConverter {
    fn pair(&self) -> ConversionPair {
        ConversionPair::new(DocumentFormat::Docx, DocumentFormat::Pdf)
    }

    async fn convert(&self, request: &ConversionRequest) -> Result<ConversionResult, ConvertError> {
        let blocks = docx::extract_text_blocks(&request.content)?;
        debug!(blocks = blocks.len(), "extracted DOCX text");
        let content = pdf::render_blocks(&blocks, &request.options)?;
        Ok(ConversionResult {
            content,
            content_type: DocumentFormat::Pdf.content_type(),
            filename: output_filename(&request.filename, DocumentFormat::Pdf),
        })
    }
}

/// DOCX to TXT: paragraph texts joined with `\n` in document order, no
/// trailing newline.
pub struct DocxToTxtConverter;

#[async_trait]
impl Converter for DocxToTxtConverter {
    fn pair(&self) -> ConversionPair {
        ConversionPair::new(DocumentFormat::Docx, DocumentFormat::Txt)
    }

    async fn convert(&self, request: &ConversionRequest) -> Result<ConversionResult, ConvertError> {
        let blocks = docx::extract_text_blocks(&request.content)?;
        Ok(ConversionResult {
            content: blocks.join("\n").into_bytes(),
            content_type: DocumentFormat::Txt.content_type(),
            filename: output_filename(&request.filename, DocumentFormat::Txt),
        })
    }
}

/// TXT to PDF: decode UTF-8, one source line per block, rendered with the
/// same pagination as the DOCX path.
pub struct TxtToPdfConverter;

#[async_trait]
impl Converter for TxtToPdfConverter {
    fn pair(&self) -> ConversionPair {
        ConversionPair::new(DocumentFormat::Txt, DocumentFormat::Pdf)
    }

    async fn convert(&self, request: &ConversionRequest) -> Result<ConversionResult, ConvertError> {
        let text = std::str::from_utf8(&request.content)
            .map_err(|err| ConvertError::failed("decoding text input", err))?;
        let blocks: Vec<String> = text.lines().map(|line| line.to_string()).collect();
        let content = pdf::render_blocks(&blocks, &request.options)?;
        Ok(ConversionResult {
            content,
            content_type: DocumentFormat::Pdf.content_type(),
            filename: output_filename(&request.filename, DocumentFormat::Pdf),
        })
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::docx::tests::docx_bytes;
    use super::*;
    use crate::models::RenderOptions;

    fn request(content: Vec<u8>, filename: &str, pair: ConversionPair) -> ConversionRequest {
        ConversionRequest {
            content: Bytes::from(content),
            filename: filename.to_string(),
            pair,
            options: RenderOptions::default(),
        }
    }

    #[tokio::test]
    async fn docx_to_txt_joins_paragraphs_without_trailing_newline() {
        let converter = DocxToTxtConverter;
        let result = converter
            .convert(&request(
                docx_bytes(&["Hello", "World"]),
                "greeting.docx",
                converter.pair(),
            ))
            .await
            .unwrap();
        assert_eq!(result.content, b"Hello\nWorld");
        assert_eq!(result.filename, "greeting.txt");
        assert_eq!(result.content_type, mime::TEXT_PLAIN);
    }

    #[tokio::test]
    async fn docx_to_txt_line_count_matches_paragraph_count() {
        let paragraphs = ["one", "two", "three", "four"];
        let converter = DocxToTxtConverter;
        let result = converter
            .convert(&request(docx_bytes(&paragraphs), "list.docx", converter.pair()))
            .await
            .unwrap();
        let text = String::from_utf8(result.content).unwrap();
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines, paragraphs);
    }

    #[tokio::test]
    async fn docx_to_pdf_is_idempotent() {
        let converter = DocxToPdfConverter;
        let input = request(docx_bytes(&["Hello", "World"]), "greeting.docx", converter.pair());
        let first = converter.convert(&input).await.unwrap();
        let second = converter.convert(&input).await.unwrap();
        assert_eq!(first.content, second.content);
        assert_eq!(first.filename, "greeting.pdf");
        assert_eq!(first.content_type, mime::APPLICATION_PDF);
    }

    #[tokio::test]
    async fn txt_to_pdf_produces_a_wellformed_pdf() {
        let converter = TxtToPdfConverter;
        let result = converter
            .convert(&request(
                b"line one\nline two\n".to_vec(),
                "notes.txt",
                converter.pair(),
            ))
            .await
            .unwrap();
        assert_eq!(result.filename, "notes.pdf");
        lopdf::Document::load_mem(&result.content).unwrap();
    }

    #[tokio::test]
    async fn txt_to_pdf_rejects_invalid_utf8() {
        let converter = TxtToPdfConverter;
        let err = converter
            .convert(&request(vec![0xff, 0xfe, 0x00], "notes.txt", converter.pair()))
            .await
            .unwrap_err();
        assert!(matches!(err, ConvertError::ConversionFailed(_)));
    }

    #[tokio::test]
    async fn corrupt_docx_is_a_conversion_failure() {
        let converter = DocxToPdfConverter;
        let err = converter
            .convert(&request(b"not a docx".to_vec(), "broken.docx", converter.pair()))
            .await
            .unwrap_err();
        assert!(matches!(err, ConvertError::ConversionFailed(_)));
    }
}
