use std::path::Path;

use bytes::Bytes;

use crate::error::ConvertError;
use crate::formats::ConversionPair;
use crate::models::{ConversionRequest, RenderOptions};

/// Check an upload before any conversion work: the extension must belong to
/// the declared source format, the size must stay under the configured cap,
/// and the content must be non-empty. Pure, no I/O, no retries.
pub fn validate_upload(
    content: Bytes,
    filename: &str,
    pair: ConversionPair,
    options: RenderOptions,
    max_file_size: usize,
) -> Result<ConversionRequest, ConvertError> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| extension.to_ascii_lowercase())
        .unwrap_or_default();
    if !pair.source.allowed_extensions().contains(&extension.as_str()) {
        return Err(ConvertError::Validation(format!(
            "only .{} files are supported for this conversion, got '{}'",
            pair.source.extension(),
            filename
        )));
    }
    if content.len() > max_file_size {
        return Err(ConvertError::Validation(format!(
            "file exceeds the maximum allowed size of {} bytes",
            max_file_size
        )));
    }
    if content.is_empty() {
        return Err(ConvertError::Validation("uploaded file is empty".to_string()));
    }
    Ok(ConversionRequest {
        content,
        filename: filename.to_string(),
        pair,
        options,
    })
}
