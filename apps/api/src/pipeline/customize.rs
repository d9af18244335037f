//! Stage 2 — resume customization.
//!
//! Embeds the full original resume text and the pretty-printed stage-1
//! analysis into one prompt and returns the model's markdown reply
//! verbatim. No post-processing: the renderer tolerates deviations from
//! the requested structure.

use crate::llm_client::{LlmClient, LlmError};
use crate::pipeline::analysis::JdAnalysis;
use crate::pipeline::prompts::CUSTOMIZE_PROMPT_TEMPLATE;

/// Output budget for the customization call — roughly a full resume.
const CUSTOMIZE_MAX_TOKENS: u32 = 4000;

/// Rewrites `resume_text` against the analyzed job requirements.
pub async fn customize_resume(
    resume_text: &str,
    analysis: &JdAnalysis,
    llm: &LlmClient,
) -> Result<String, LlmError> {
    let analysis_json =
        serde_json::to_string_pretty(analysis).unwrap_or_else(|_| "{}".to_string());

    let prompt = CUSTOMIZE_PROMPT_TEMPLATE
        .replace("{resume_text}", resume_text)
        .replace("{jd_analysis}", &analysis_json);

    let response = llm.call(&prompt, CUSTOMIZE_MAX_TOKENS).await?;
    let text = response.text().ok_or(LlmError::EmptyContent)?;
    Ok(text.to_string())
}
