use std::sync::Arc;

use crate::config::{PdfEngine, Settings};
use crate::convert::{DocxToPdfConverter, DocxToTxtConverter, SofficeDocxToPdf, TxtToPdfConverter};
use crate::dispatch::{ConversionDispatcher, Converter};
use crate::error::ConvertError;

pub type Services = Arc<ServiceCollection>;

/// Everything a request handler needs, built once at startup and shared
/// read-only. The dispatcher's adapter table never changes after this.
pub struct ServiceCollection {
    pub settings: Settings,
    pub dispatcher: ConversionDispatcher,
}

impl std::fmt::Debug for ServiceCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceCollection")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl ServiceCollection {
    pub async fn build(settings: Settings) -> Result<Services, ConvertError> {
        let docx_to_pdf: Arc<dyn Converter> = match settings.pdf_engine {
            PdfEngine::Builtin => Arc::new(DocxToPdfConverter),
            PdfEngine::Libreoffice => {
                let soffice = SofficeDocxToPdf::new(&settings.soffice_path);
                soffice.probe().await?;
                Arc::new(soffice)
            }
        };
        let adapters: Vec<Arc<dyn Converter>> = vec![
            docx_to_pdf,
            Arc::new(DocxToTxtConverter),
            Arc::new(TxtToPdfConverter),
        ];
        Ok(Arc::new(ServiceCollection {
            settings,
            dispatcher: ConversionDispatcher::new(adapters),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::{ConversionPair, DocumentFormat};

    #[tokio::test]
    async fn default_build_registers_exactly_three_pairs() {
        let services = ServiceCollection::build(Settings::default()).await.unwrap();
        let pairs = services.dispatcher.supported_pairs();
        assert_eq!(pairs.len(), 3);
        assert!(pairs.contains(&ConversionPair::new(DocumentFormat::Docx, DocumentFormat::Pdf)));
        assert!(pairs.contains(&ConversionPair::new(DocumentFormat::Docx, DocumentFormat::Txt)));
        assert!(pairs.contains(&ConversionPair::new(DocumentFormat::Txt, DocumentFormat::Pdf)));
    }

    #[tokio::test]
    async fn missing_libreoffice_is_fatal_at_startup() {
        let settings = Settings {
            pdf_engine: PdfEngine::Libreoffice,
            soffice_path: "/nonexistent/soffice-for-tests".into(),
            ..Settings::default()
        };
        let err = ServiceCollection::build(settings).await.unwrap_err();
        assert!(matches!(err, ConvertError::CapabilityUnavailable(_)));
    }
}
