//! POST /api/v1/resume/render — markdown text → downloadable PDF.

use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::render::render_pdf;

/// Suggested filename sent with the download.
const DOWNLOAD_FILENAME: &str = "customized_resume.pdf";

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub resume_markdown: String,
}

/// POST /api/v1/resume/render
///
/// Renders the customized resume markdown into a PDF and streams it back
/// as an attachment. The render itself is CPU-bound, so it runs on the
/// blocking pool.
pub async fn handle_render(
    Json(request): Json<RenderRequest>,
) -> Result<impl IntoResponse, AppError> {
    let bytes = tokio::task::spawn_blocking(move || render_pdf(&request.resume_markdown))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_FILENAME}\""),
            ),
        ],
        bytes,
    ))
}
