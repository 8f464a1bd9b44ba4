use axum::routing::get;
use axum::{Json, Router};

use crate::consts::{NAME, VERSION};
use crate::dtos::{HealthDto, RootDto, RootLinks};

pub fn create_route() -> Router {
    Router::new().route("/", get(root_links)).route("/health", get(health))
}

pub async fn root_links() -> Json<RootDto<'static>> {
    Json(RootDto {
        name: NAME,
        version: VERSION,
        message: "Welcome to the document conversion service",
        _links: RootLinks {
            documents: "/api/v1/documents",
            supported_conversions: "/api/v1/documents/supported-conversions",
            health: "/health",
        },
    })
}

#[tracing::instrument]
pub async fn health() -> Json<HealthDto<'static>> {
    Json(HealthDto {
        status: "healthy",
        version: VERSION,
    })
}
