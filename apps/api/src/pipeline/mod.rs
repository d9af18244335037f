// Resume pipeline: two-stage LLM orchestration.
// Stage 1 analyzes the job description into structured requirements;
// stage 2 rewrites the resume against them.
// All LLM calls go through llm_client — no direct Anthropic calls here.

pub mod analysis;
pub mod customize;
pub mod processor;
pub mod prompts;

pub use analysis::JdAnalysis;
pub use processor::{process, ProcessOutcome};
