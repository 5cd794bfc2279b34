#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::contract::fields::ValidationError;
use crate::layout::LayoutError;
use crate::pdf::PdfError;

/// Message returned for every server-side failure. Details stay in the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "Erro interno ao gerar o contrato.";

/// Message shown to the user when required fields are empty.
pub const VALIDATION_MESSAGE: &str = "Preencha todos os campos antes de gerar o contrato.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Validation(err) => {
                tracing::warn!("Rejected contract request: {err}");
                let body = Json(json!({
                    "error": {
                        "code": "VALIDATION_ERROR",
                        "message": VALIDATION_MESSAGE,
                        "fields": err.missing,
                    }
                }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            AppError::Layout(e) => {
                tracing::error!("Layout error: {e}");
                internal_error()
            }
            AppError::Pdf(e) => {
                tracing::error!("PDF error: {e}");
                internal_error()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                internal_error()
            }
        }
    }
}

/// Generic 500 with a plain-text body.
fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE).into_response()
}
