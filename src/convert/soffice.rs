use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::dispatch::Converter;
use crate::error::ConvertError;
use crate::formats::{output_filename, ConversionPair, DocumentFormat};
use crate::models::{ConversionRequest, ConversionResult};

/// DOCX to PDF through a headless LibreOffice. Selected with
/// `PDF_ENGINE=libreoffice`; keeps the original layout instead of the
/// builtin plain-text rendering. Each conversion runs in its own temp
/// directory which is removed when the request finishes.
pub struct SofficeDocxToPdf {
    soffice_path: PathBuf,
}

impl SofficeDocxToPdf {
    pub fn new(soffice_path: impl Into<PathBuf>) -> SofficeDocxToPdf {
        SofficeDocxToPdf {
            soffice_path: soffice_path.into(),
        }
    }

    /// Startup probe: a missing or broken soffice binary is fatal before the
    /// service accepts traffic, rather than a surprise on the first request.
    pub async fn probe(&self) -> Result<(), ConvertError> {
        let output = Command::new(&self.soffice_path)
            .arg("--version")
            .output()
            .await
            .map_err(|err| {
                ConvertError::CapabilityUnavailable(format!(
                    "libreoffice is not runnable at '{}': {}",
                    self.soffice_path.display(),
                    err
                ))
            })?;
        if !output.status.success() {
            return Err(ConvertError::CapabilityUnavailable(format!(
                "libreoffice probe exited with {}",
                output.status
            )));
        }
        debug!(
            version = %String::from_utf8_lossy(&output.stdout).trim(),
            "libreoffice available"
        );
        Ok(())
    }
}

#[async_trait]
impl Converter for SofficeDocxToPdf {
    fn pair(&self) -> ConversionPair {
        ConversionPair::new(DocumentFormat::Docx, DocumentFormat::Pdf)
    }

    async fn convert(&self, request: &ConversionRequest) -> Result<ConversionResult, ConvertError> {
        let workdir = tempfile::tempdir()
            .map_err(|err| ConvertError::failed("creating conversion workdir", err))?;
        let input_path = workdir.path().join("input.docx");
        tokio::fs::write(&input_path, &request.content)
            .await
            .map_err(|err| ConvertError::failed("writing conversion input", err))?;

        let output = Command::new(&self.soffice_path)
            .args(["--headless", "--convert-to", "pdf", "--outdir"])
            .arg(workdir.path())
            .arg(&input_path)
            .output()
            .await
            .map_err(|err| {
                ConvertError::CapabilityUnavailable(format!(
                    "libreoffice is not runnable at '{}': {}",
                    self.soffice_path.display(),
                    err
                ))
            })?;
        if !output.status.success() {
            return Err(ConvertError::failed(
                "libreoffice conversion",
                String::from_utf8_lossy(&output.stderr),
            ));
        }

        let pdf_path = workdir.path().join("input.pdf");
        let content = tokio::fs::read(&pdf_path)
            .await
            .map_err(|err| ConvertError::failed("libreoffice produced no output", err))?;

        Ok(ConversionResult {
            content,
            content_type: DocumentFormat::Pdf.content_type(),
            filename: output_filename(&request.filename, DocumentFormat::Pdf),
        })
    }
}
