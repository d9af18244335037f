//! Stage 1 — job-description analysis.
//!
//! Turns a free-text job description into structured `JobRequirements` via
//! one LLM call. The model reply is best-effort JSON: the parsing policy
//! locates the first `{` and the last `}` in the reply, slices that
//! substring, and attempts to parse it. Malformed output degrades into one
//! of two fallback shapes instead of failing — stage 2 always receives *a*
//! usable analysis value.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::llm_client::{LlmClient, LlmError};
use crate::pipeline::prompts::JD_ANALYSIS_PROMPT_TEMPLATE;

/// Output budget for the analysis call.
const ANALYSIS_MAX_TOKENS: u32 = 2000;

pub const ANALYSIS_PARSE_ERROR: &str = "Could not parse JSON from response";

/// The structured requirements extracted from a job description.
///
/// All fields are optional — the model fills what it can. Unrecognized keys
/// are preserved in `extra` so a well-formed reply round-trips exactly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRequirements {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_experience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_responsibilities: Option<Vec<String>>,
    /// Sequence or string — the model is inconsistent here, so keep it loose.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifications: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JobRequirements {
    /// Builds requirements from any JSON object the model produced.
    ///
    /// Fields matching the expected shapes land in the typed slots. When a
    /// known key carries an off-shape value (e.g. `key_skills` as a string
    /// instead of a list), the object is preserved wholesale in the
    /// flattened map instead — a well-formed reply always round-trips
    /// exactly, it never degrades to a fallback shape.
    fn from_object(object: Map<String, Value>) -> Self {
        serde_json::from_value(Value::Object(object.clone())).unwrap_or_else(|_| JobRequirements {
            extra: object,
            ..Default::default()
        })
    }
}

/// The analysis result: either structured requirements or one of two
/// fallback shapes for unparsable model output. Serialized untagged so the
/// wire shapes are `{...requirements...}`, `{"error": ...}`, or
/// `{"raw_response": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum JdAnalysis {
    Requirements(JobRequirements),
    ParseFailure { error: String },
    RawFallback { raw_response: String },
}

/// Analyzes a job description with one LLM call.
///
/// Never fails on malformed model output — only transport-level `LlmError`
/// propagates.
pub async fn analyze_job_description(
    jd_text: &str,
    llm: &LlmClient,
) -> Result<JdAnalysis, LlmError> {
    let prompt = JD_ANALYSIS_PROMPT_TEMPLATE.replace("{jd_text}", jd_text);
    let response = llm.call(&prompt, ANALYSIS_MAX_TOKENS).await?;
    let reply = response.text().ok_or(LlmError::EmptyContent)?;
    Ok(parse_analysis_reply(reply))
}

/// Applies the three-tier fallback policy to a raw model reply.
///
/// 1. First `{` / last `}` found and well-ordered → parse the slice as JSON.
/// 2. No such slice → `ParseFailure` with a fixed message.
/// 3. Slice found but invalid JSON → `RawFallback` carrying the full reply.
pub fn parse_analysis_reply(reply: &str) -> JdAnalysis {
    let start = reply.find('{');
    let end = reply.rfind('}');

    let (start, end) = match (start, end) {
        (Some(s), Some(e)) if e > s => (s, e),
        _ => {
            debug!("analysis reply contained no JSON object");
            return JdAnalysis::ParseFailure {
                error: ANALYSIS_PARSE_ERROR.to_string(),
            };
        }
    };

    match serde_json::from_str::<Map<String, Value>>(&reply[start..=end]) {
        Ok(object) => JdAnalysis::Requirements(JobRequirements::from_object(object)),
        Err(e) => {
            debug!("analysis reply JSON did not parse: {e}");
            JdAnalysis::RawFallback {
                raw_response: reply.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prompt_template_embeds_jd_and_names_all_keys() {
        let prompt = JD_ANALYSIS_PROMPT_TEMPLATE.replace("{jd_text}", "Senior Rust Engineer");
        assert!(prompt.contains("Senior Rust Engineer"));
        assert!(!prompt.contains("{jd_text}"));
        for key in [
            "key_skills",
            "required_experience",
            "key_responsibilities",
            "qualifications",
            "keywords",
        ] {
            assert!(prompt.contains(key), "prompt must name {key}");
        }
    }

    #[test]
    fn test_well_formed_json_with_prose_is_parsed() {
        let reply = r#"Here you go: {"key_skills": ["Python","SQL"], "keywords": ["data","analytics"]}"#;
        let analysis = parse_analysis_reply(reply);
        match analysis {
            JdAnalysis::Requirements(req) => {
                assert_eq!(
                    req.key_skills,
                    Some(vec!["Python".to_string(), "SQL".to_string()])
                );
                assert_eq!(
                    req.keywords,
                    Some(vec!["data".to_string(), "analytics".to_string()])
                );
                assert_eq!(req.required_experience, None);
            }
            other => panic!("expected Requirements, got {other:?}"),
        }
    }

    #[test]
    fn test_all_five_keys_round_trip() {
        let reply = r#"{
            "key_skills": ["Rust"],
            "required_experience": "5+ years backend",
            "key_responsibilities": ["Build services"],
            "qualifications": ["BS in CS"],
            "keywords": ["Rust", "Tokio"]
        }"#;
        let analysis = parse_analysis_reply(reply);
        let JdAnalysis::Requirements(req) = analysis else {
            panic!("expected Requirements");
        };
        assert_eq!(req.required_experience.as_deref(), Some("5+ years backend"));
        assert_eq!(req.qualifications, Some(json!(["BS in CS"])));
        let serialized = serde_json::to_value(&req).unwrap();
        assert_eq!(serialized["keywords"], json!(["Rust", "Tokio"]));
    }

    #[test]
    fn test_qualifications_may_be_a_plain_string() {
        let reply = r#"{"qualifications": "Bachelor's degree required"}"#;
        let JdAnalysis::Requirements(req) = parse_analysis_reply(reply) else {
            panic!("expected Requirements");
        };
        assert_eq!(req.qualifications, Some(json!("Bachelor's degree required")));
    }

    #[test]
    fn test_unknown_keys_are_preserved() {
        let reply = r#"{"keywords": ["ATS"], "salary_range": "$100k-$150k"}"#;
        let JdAnalysis::Requirements(req) = parse_analysis_reply(reply) else {
            panic!("expected Requirements");
        };
        assert_eq!(req.extra.get("salary_range"), Some(&json!("$100k-$150k")));
    }

    #[test]
    fn test_mistyped_known_key_still_round_trips() {
        // Models sometimes emit a comma-joined string where a list is
        // expected. The reply is still a well-formed object, so it must come
        // back as requirements with every value intact, not as a fallback.
        let reply = r#"{"key_skills": "Python, SQL", "keywords": ["data"]}"#;
        let JdAnalysis::Requirements(req) = parse_analysis_reply(reply) else {
            panic!("expected Requirements");
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"key_skills": "Python, SQL", "keywords": ["data"]})
        );
    }

    #[test]
    fn test_no_braces_is_parse_failure_with_exact_message() {
        let analysis = parse_analysis_reply("I cannot analyze this job description.");
        assert_eq!(
            analysis,
            JdAnalysis::ParseFailure {
                error: "Could not parse JSON from response".to_string()
            }
        );
    }

    #[test]
    fn test_reversed_braces_is_parse_failure() {
        // '}' appears before '{' — not a well-ordered pair
        let analysis = parse_analysis_reply("} nothing useful {");
        assert!(matches!(analysis, JdAnalysis::ParseFailure { .. }));
    }

    #[test]
    fn test_invalid_json_slice_falls_back_to_full_reply() {
        let reply = "Sure! {key_skills: not valid json} hope that helps";
        let analysis = parse_analysis_reply(reply);
        assert_eq!(
            analysis,
            JdAnalysis::RawFallback {
                raw_response: reply.to_string()
            }
        );
    }

    #[test]
    fn test_fallback_shapes_serialize_as_documented() {
        let failure = JdAnalysis::ParseFailure {
            error: ANALYSIS_PARSE_ERROR.to_string(),
        };
        assert_eq!(
            serde_json::to_value(&failure).unwrap(),
            json!({"error": "Could not parse JSON from response"})
        );

        let fallback = JdAnalysis::RawFallback {
            raw_response: "free text".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&fallback).unwrap(),
            json!({"raw_response": "free text"})
        );
    }
}
