//! Axum route handlers for the Resume API.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::pipeline::run_pipeline;
use crate::layout::DocumentBlock;
use crate::models::resume::{ResumeForm, MAX_ENTRIES_PER_SECTION};
use crate::state::AppState;

/// Filename offered to the browser for every download.
pub const DOWNLOAD_FILENAME: &str = "Resume.pdf";

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub resume_id: Uuid,
    pub resume_text: String,
    pub blocks: Vec<DocumentBlock>,
    pub page_count: usize,
    pub generated_at: DateTime<Utc>,
    pub download_url: String,
}

pub fn download_url(resume_id: Uuid) -> String {
    format!("/api/v1/resumes/{resume_id}/pdf")
}

/// POST /api/v1/resumes
///
/// Full pipeline: assemble prompt → generate → format → write temp PDF.
/// The PDF stays downloadable until evicted from the document store.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(form): Json<ResumeForm>,
) -> Result<Json<GenerateResponse>, AppError> {
    let oversized = form.oversized_sections();
    if !oversized.is_empty() {
        let detail = oversized
            .iter()
            .map(|(section, n)| format!("{section} has {n} entries"))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(AppError::Validation(format!(
            "at most {MAX_ENTRIES_PER_SECTION} entries per section: {detail}"
        )));
    }

    let output = run_pipeline(
        state.generator.as_ref(),
        &form.to_input(),
        &state.page_config,
        state.config.output_dir.as_deref(),
    )
    .await?;

    let page_count = output.document.page_count();
    let stored = state.documents.insert(output.resume_id, output.path).await;
    tracing::debug!(resume_id = %output.resume_id, stored, "Stored resume document");

    Ok(Json(GenerateResponse {
        resume_id: output.resume_id,
        resume_text: output.resume_text,
        blocks: output.document.blocks,
        page_count,
        generated_at: Utc::now(),
        download_url: download_url(output.resume_id),
    }))
}

/// GET /api/v1/resumes/:id/pdf
///
/// Serves a stored PDF as an attachment named `Resume.pdf`.
pub async fn handle_download(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let not_found = || AppError::NotFound(format!("Resume {resume_id} not found"));

    let path = state.documents.path_of(resume_id).await.ok_or_else(not_found)?;

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        // Evicted between lookup and read.
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
        Err(e) => {
            return Err(AppError::Internal(anyhow::Error::new(e).context(format!(
                "reading stored resume {}",
                path.display()
            ))))
        }
    };

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_FILENAME}\""),
            ),
        ],
        Bytes::from(bytes),
    ))
}
