use serde::{Deserialize, Serialize};

use crate::formats::DocumentFormat;

/// One supported conversion pair as listed by the capability endpoint.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ConversionPairDto {
    pub from: DocumentFormat,
    pub to: DocumentFormat,
}

/// Structured error body, mirrored by every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDto {
    pub detail: String,
}
