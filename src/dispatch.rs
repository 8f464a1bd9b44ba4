use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ConvertError;
use crate::formats::ConversionPair;
use crate::models::{ConversionRequest, ConversionResult};

/// One conversion adapter. Each implementation owns exactly one
/// (source, target) pair and maps the parsing collaborator's output model
/// into the rendering collaborator's input model.
#[async_trait]
pub trait Converter: Send + Sync {
    fn pair(&self) -> ConversionPair;

    async fn convert(&self, request: &ConversionRequest) -> Result<ConversionResult, ConvertError>;
}

/// The capability table: adapters registered once at startup, read-only
/// afterwards. Dispatch is a plain table lookup, no queuing or cross-request
/// coordination.
pub struct ConversionDispatcher {
    adapters: Vec<Arc<dyn Converter>>,
}

impl ConversionDispatcher {
    pub fn new(adapters: Vec<Arc<dyn Converter>>) -> ConversionDispatcher {
        ConversionDispatcher { adapters }
    }

    pub fn supported_pairs(&self) -> Vec<ConversionPair> {
        self.adapters.iter().map(|adapter| adapter.pair()).collect()
    }

    pub async fn dispatch(&self, request: &ConversionRequest) -> Result<ConversionResult, ConvertError> {
        let adapter = self
            .adapters
            .iter()
            .find(|adapter| adapter.pair() == request.pair)
            .ok_or_else(|| self.unsupported(request.pair))?;
        adapter.convert(request).await
    }

    fn unsupported(&self, pair: ConversionPair) -> ConvertError {
        let supported = self
            .supported_pairs()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        ConvertError::UnsupportedConversion(format!(
            "conversion {} is not supported; supported conversions: {}",
            pair, supported
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use bytes::Bytes;

    use super::*;
    use crate::formats::DocumentFormat;
    use crate::models::RenderOptions;

    struct ProbeConverter {
        pair: ConversionPair,
        invoked: Arc<AtomicBool>,
    }

    #[async_trait]
    impl Converter for ProbeConverter {
        fn pair(&self) -> ConversionPair {
            self.pair
        }

        async fn convert(&self, request: &ConversionRequest) -> Result<ConversionResult, ConvertError> {
            self.invoked.store(true, Ordering::SeqCst);
            Ok(ConversionResult {
                content: request.content.to_vec(),
                content_type: self.pair.target.content_type(),
                filename: request.filename.clone(),
            })
        }
    }

    fn request_for(pair: ConversionPair) -> ConversionRequest {
        ConversionRequest {
            content: Bytes::from_static(b"content"),
            filename: "input.docx".to_string(),
            pair,
            options: RenderOptions::default(),
        }
    }

    #[tokio::test]
    async fn dispatches_to_matching_adapter() {
        let invoked = Arc::new(AtomicBool::new(false));
        let pair = ConversionPair::new(DocumentFormat::Docx, DocumentFormat::Pdf);
        let dispatcher = ConversionDispatcher::new(vec![Arc::new(ProbeConverter {
            pair,
            invoked: invoked.clone(),
        })]);

        let result = dispatcher.dispatch(&request_for(pair)).await.unwrap();
        assert!(invoked.load(Ordering::SeqCst));
        assert_eq!(result.content, b"content");
    }

    #[tokio::test]
    async fn unsupported_pair_lists_supported_ones_and_skips_adapters() {
        let invoked = Arc::new(AtomicBool::new(false));
        let dispatcher = ConversionDispatcher::new(vec![
            Arc::new(ProbeConverter {
                pair: ConversionPair::new(DocumentFormat::Docx, DocumentFormat::Pdf),
                invoked: invoked.clone(),
            }),
            Arc::new(ProbeConverter {
                pair: ConversionPair::new(DocumentFormat::Txt, DocumentFormat::Pdf),
                invoked: invoked.clone(),
            }),
        ]);

        let unsupported = ConversionPair::new(DocumentFormat::Pdf, DocumentFormat::Txt);
        let err = dispatcher.dispatch(&request_for(unsupported)).await.unwrap_err();

        assert!(matches!(err, ConvertError::UnsupportedConversion(_)));
        let message = err.to_string();
        assert!(message.contains("pdf -> txt"));
        assert!(message.contains("docx -> pdf"));
        assert!(message.contains("txt -> pdf"));
        assert!(!invoked.load(Ordering::SeqCst));
    }
}
