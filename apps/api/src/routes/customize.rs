//! POST /api/v1/resume/customize — the full pipeline over a multipart upload.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::pipeline::{process, ProcessOutcome};
use crate::state::AppState;

/// An uploaded resume file with its original filename (the extension
/// drives extraction dispatch).
pub struct UploadedResume {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Parsed form fields from the multipart upload.
pub struct CustomizeForm {
    pub resume: UploadedResume,
    pub job_description: String,
}

/// Mirrors the pipeline's two-element result: `customized_resume` is null
/// exactly when extraction failed, in which case `jd_analysis` carries an
/// explanatory string instead of the analysis object.
#[derive(Debug, Serialize)]
pub struct CustomizeResponse {
    pub customized_resume: Option<String>,
    pub jd_analysis: Value,
}

/// Parse the multipart form into structured fields.
async fn parse_multipart(mut multipart: Multipart) -> Result<CustomizeForm, AppError> {
    let mut resume: Option<UploadedResume> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read form field: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "resume" => {
                let filename = field.file_name().unwrap_or("resume").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file data: {e}")))?
                    .to_vec();
                resume = Some(UploadedResume { filename, data });
            }
            "job_description" => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read job_description: {e}"))
                })?;
                job_description = Some(text);
            }
            _ => {
                // Ignore unknown fields
                let _ = field.bytes().await;
            }
        }
    }

    let resume = resume
        .ok_or_else(|| AppError::Validation("resume file field is required".to_string()))?;
    let job_description = job_description
        .ok_or_else(|| AppError::Validation("job_description field is required".to_string()))?;

    Ok(CustomizeForm {
        resume,
        job_description,
    })
}

/// POST /api/v1/resume/customize
///
/// Multipart form: `resume` (PDF/DOCX/TXT file) + `job_description` (text).
/// Runs extract → analyze → customize. Extraction failures come back as the
/// degenerate response shape, not an HTTP error; LLM transport failures
/// surface as 502.
pub async fn handle_customize(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CustomizeResponse>, AppError> {
    let form = parse_multipart(multipart).await?;

    if form.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let outcome = process(
        &form.resume.filename,
        &form.resume.data,
        &form.job_description,
        &state.llm,
    )
    .await?;

    let response = match outcome {
        ProcessOutcome::Customized {
            resume_markdown,
            analysis,
        } => CustomizeResponse {
            customized_resume: Some(resume_markdown),
            jd_analysis: serde_json::to_value(&analysis)
                .map_err(|e| AppError::Internal(e.into()))?,
        },
        ProcessOutcome::ExtractionFailed { message } => CustomizeResponse {
            customized_resume: None,
            jd_analysis: Value::String(message),
        },
    };

    Ok(Json(response))
}
