//! Pipeline orchestration: extract → analyze → customize.
//!
//! One run is synchronous and stateless — no retries, no partial results.
//! Extraction failures degrade into `ProcessOutcome::ExtractionFailed`;
//! LLM transport failures propagate untouched to the caller.

use tracing::{info, warn};

use crate::extract::extract_text;
use crate::llm_client::{LlmClient, LlmError};
use crate::pipeline::analysis::{analyze_job_description, JdAnalysis};
use crate::pipeline::customize::customize_resume;

/// Message returned when the resume file yields no usable text.
pub const EXTRACTION_FAILED_MESSAGE: &str = "Error: Could not extract text from resume file";

/// The result of a full pipeline run.
///
/// `ExtractionFailed` is the degenerate shape: no customized text exists
/// and the analysis slot carries an explanatory string instead. Callers
/// must branch on the variant.
#[derive(Debug)]
pub enum ProcessOutcome {
    Customized {
        resume_markdown: String,
        analysis: JdAnalysis,
    },
    ExtractionFailed {
        message: String,
    },
}

/// Runs the full pipeline for one uploaded resume and job description.
///
/// An extraction error or a whitespace-only extraction short-circuits to
/// `ExtractionFailed` before any LLM call is made.
pub async fn process(
    filename: &str,
    resume_data: &[u8],
    jd_text: &str,
    llm: &LlmClient,
) -> Result<ProcessOutcome, LlmError> {
    let resume_text = match extract_text(filename, resume_data) {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            warn!("resume file '{filename}' contained no text");
            return Ok(ProcessOutcome::ExtractionFailed {
                message: EXTRACTION_FAILED_MESSAGE.to_string(),
            });
        }
        Err(e) => {
            warn!("resume extraction failed for '{filename}': {e}");
            return Ok(ProcessOutcome::ExtractionFailed {
                message: EXTRACTION_FAILED_MESSAGE.to_string(),
            });
        }
    };

    info!(
        "extracted {} chars from '{filename}', analyzing job description",
        resume_text.len()
    );
    let analysis = analyze_job_description(jd_text, llm).await?;

    let resume_markdown = customize_resume(&resume_text, &analysis, llm).await?;
    info!("customization produced {} chars", resume_markdown.len());

    Ok(ProcessOutcome::Customized {
        resume_markdown,
        analysis,
    })
}
