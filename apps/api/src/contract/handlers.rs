//! Axum route handlers for the Contract API.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::contract::fields::{ContractFields, FieldKey, InputKind};
use crate::contract::service::{build_preview, generate_pdf, ContractPreview};
use crate::contract::template::TemplateVersion;
use crate::errors::AppError;
use crate::state::AppState;

pub const PDF_FILENAME: &str = "contrato.pdf";

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct FieldSpec {
    pub key: FieldKey,
    pub label: &'static str,
    pub input: InputKind,
}

#[derive(Debug, Serialize)]
pub struct FieldSchemaResponse {
    pub template_version: TemplateVersion,
    pub clause_count: usize,
    pub fields: Vec<FieldSpec>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/contracts/pdf (also POST /api/generate-contract)
///
/// Validates the nine fields and returns the contract as an attachment.
pub async fn handle_generate_pdf(
    State(state): State<AppState>,
    Json(fields): Json<ContractFields>,
) -> Result<Response, AppError> {
    let request_id = Uuid::new_v4();
    let settings = state.settings.clone();

    let pdf = tokio::task::spawn_blocking(move || generate_pdf(&fields, &settings))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF generation: {e}"))
        })??;

    info!(
        %request_id,
        template_version = %state.settings.template,
        pages = pdf.page_count,
        lines = pdf.line_count,
        bytes = pdf.bytes.len(),
        "Contract PDF generated"
    );

    let disposition = format!("attachment; filename={PDF_FILENAME}");
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Bytes::from(pdf.bytes),
    )
        .into_response())
}

/// POST /api/v1/contracts/preview
///
/// Returns the rendered text (dated today) and its page/line counts.
pub async fn handle_preview(
    State(state): State<AppState>,
    Json(fields): Json<ContractFields>,
) -> Result<Json<ContractPreview>, AppError> {
    let settings = state.settings.clone();
    let today = chrono::Local::now().date_naive();

    let preview = tokio::task::spawn_blocking(move || build_preview(&fields, &settings, today))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in preview: {e}"))
        })??;

    Ok(Json(preview))
}

/// GET /api/v1/contracts/fields
///
/// Describes the form: field keys, labels, and input kinds in display order.
pub async fn handle_fields(State(state): State<AppState>) -> Json<FieldSchemaResponse> {
    let template = state.settings.template;
    Json(FieldSchemaResponse {
        template_version: template,
        clause_count: template.clause_count(),
        fields: FieldKey::ALL
            .into_iter()
            .map(|key| FieldSpec {
                key,
                label: key.label(),
                input: key.input_kind(),
            })
            .collect(),
    })
}
