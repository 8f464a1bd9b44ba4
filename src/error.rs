use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use crate::dtos::ErrorDto;

/// Error taxonomy for the conversion pipeline. Every layer boundary returns
/// one of these; the HTTP layer translates them into status codes and a
/// `{ "detail": … }` body. Server-side variants keep the collaborator failure
/// for the logs and never echo it to the client.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    UnsupportedConversion(String),
    #[error("{0}")]
    ConversionFailed(String),
    #[error("{0}")]
    CapabilityUnavailable(String),
}

impl ConvertError {
    pub fn failed(context: &str, err: impl std::fmt::Display) -> Self {
        ConvertError::ConversionFailed(format!("{}: {}", context, err))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ConvertError::Validation(_) => StatusCode::BAD_REQUEST,
            ConvertError::UnsupportedConversion(_) => StatusCode::BAD_REQUEST,
            ConvertError::ConversionFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ConvertError::CapabilityUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn public_detail(&self) -> String {
        match self {
            ConvertError::Validation(detail) => detail.clone(),
            ConvertError::UnsupportedConversion(detail) => detail.clone(),
            ConvertError::ConversionFailed(_) => "Error converting document".to_string(),
            ConvertError::CapabilityUnavailable(_) => "Conversion engine unavailable".to_string(),
        }
    }
}

impl IntoResponse for ConvertError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("conversion failed: {}", self);
        }
        (status, Json(ErrorDto { detail: self.public_detail() })).into_response()
    }
}
