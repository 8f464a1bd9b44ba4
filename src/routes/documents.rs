use axum::extract::multipart::Field;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use bytes::Bytes;
use tracing::info;

use crate::dtos::ConversionPairDto;
use crate::error::ConvertError;
use crate::formats::{ConversionPair, DocumentFormat};
use crate::models::RenderOptions;
use crate::state::Services;
use crate::validate::validate_upload;

// Headroom on top of the file size limit for multipart framing and the
// option fields.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn create_route(services: Services) -> Router {
    let body_limit = services.settings.max_file_size + MULTIPART_OVERHEAD;
    Router::new()
        .route("/api/v1/documents/docx-to-pdf", post(docx_to_pdf))
        .route("/api/v1/documents/docx-to-txt", post(docx_to_txt))
        .route("/api/v1/documents/txt-to-pdf", post(txt_to_pdf))
        .route("/api/v1/documents/supported-conversions", get(supported_conversions))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(services)
}

#[tracing::instrument(skip(services, multipart))]
pub async fn docx_to_pdf(
    State(services): State<Services>,
    multipart: Multipart,
) -> Result<Response, ConvertError> {
    convert_upload(
        services,
        multipart,
        ConversionPair::new(DocumentFormat::Docx, DocumentFormat::Pdf),
    )
    .await
}

#[tracing::instrument(skip(services, multipart))]
pub async fn docx_to_txt(
    State(services): State<Services>,
    multipart: Multipart,
) -> Result<Response, ConvertError> {
    convert_upload(
        services,
        multipart,
        ConversionPair::new(DocumentFormat::Docx, DocumentFormat::Txt),
    )
    .await
}

#[tracing::instrument(skip(services, multipart))]
pub async fn txt_to_pdf(
    State(services): State<Services>,
    multipart: Multipart,
) -> Result<Response, ConvertError> {
    convert_upload(
        services,
        multipart,
        ConversionPair::new(DocumentFormat::Txt, DocumentFormat::Pdf),
    )
    .await
}

#[tracing::instrument(skip(services))]
pub async fn supported_conversions(State(services): State<Services>) -> Json<Vec<ConversionPairDto>> {
    Json(
        services
            .dispatcher
            .supported_pairs()
            .into_iter()
            .map(|pair| ConversionPairDto {
                from: pair.source,
                to: pair.target,
            })
            .collect(),
    )
}

async fn convert_upload(
    services: Services,
    multipart: Multipart,
    pair: ConversionPair,
) -> Result<Response, ConvertError> {
    let upload = read_upload(multipart).await?;
    let request = validate_upload(
        upload.content,
        &upload.filename,
        pair,
        upload.options,
        services.settings.max_file_size,
    )?;
    let result = services.dispatcher.dispatch(&request).await?;
    info!(
        filename = %request.filename,
        conversion = %pair,
        output_size = result.content.len(),
        "conversion completed"
    );
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, result.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", disposition_filename(&result.filename)),
            ),
        ],
        result.content,
    )
        .into_response())
}

struct Upload {
    filename: String,
    content: Bytes,
    options: RenderOptions,
}

/// Pull the file field and the optional render-option fields out of the
/// multipart body. Unknown fields are ignored.
async fn read_upload(mut multipart: Multipart) -> Result<Upload, ConvertError> {
    let mut file: Option<(String, Bytes)> = None;
    let mut options = RenderOptions::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ConvertError::Validation(format!("invalid multipart body: {}", err)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content = field.bytes().await.map_err(|err| {
                    ConvertError::Validation(format!("could not read uploaded file: {}", err))
                })?;
                file = Some((filename, content));
            }
            "page_size" => {
                options.page_size = read_text(field).await?.parse().map_err(ConvertError::Validation)?;
            }
            "orientation" => {
                options.orientation = read_text(field).await?.parse().map_err(ConvertError::Validation)?;
            }
            "margin" => {
                options.margin_mm = read_text(field).await?.parse().map_err(|_| {
                    ConvertError::Validation("margin must be a whole number of millimetres".to_string())
                })?;
            }
            _ => {}
        }
    }
    let (filename, content) =
        file.ok_or_else(|| ConvertError::Validation("missing multipart field 'file'".to_string()))?;
    Ok(Upload {
        filename,
        content,
        options,
    })
}

async fn read_text(field: Field<'_>) -> Result<String, ConvertError> {
    field
        .text()
        .await
        .map_err(|err| ConvertError::Validation(format!("invalid form field: {}", err)))
}

/// Make a derived filename safe for the Content-Disposition quoted-string:
/// quotes, backslashes, control characters, and non-ASCII bytes would break
/// the header value, so they become underscores.
fn disposition_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if (c as u32) < 0x20 || (c as u32) > 0x7e => '_',
            c => c,
        })
        .collect()
}
