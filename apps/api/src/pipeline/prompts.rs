// All LLM prompt constants for the resume pipeline.

/// Stage 1 prompt template. Replace `{jd_text}` before sending.
///
/// Instructs the model to return a JSON object with exactly the five
/// recognized analysis keys. The reply is still treated as best-effort —
/// see `analysis::parse_analysis_reply` for the fallback policy.
pub const JD_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze this job description and extract the following in a structured format:

Job Description:
{jd_text}

Please provide a JSON response with:
1. key_skills: List of required technical and soft skills
2. required_experience: Years and type of experience needed
3. key_responsibilities: Main job responsibilities
4. qualifications: Required education and certifications
5. keywords: Important ATS keywords to include

Format as valid JSON only."#;

/// Stage 2 prompt template.
/// Replace `{resume_text}` and `{jd_analysis}` before sending.
///
/// `{jd_analysis}` is the pretty-printed JSON of the stage-1 analysis
/// (including its fallback shapes — the model copes with either).
pub const CUSTOMIZE_PROMPT_TEMPLATE: &str = r#"You are an expert resume writer. Customize this resume to match the job requirements while keeping all information truthful.

Original Resume:
{resume_text}

Job Requirements:
{jd_analysis}

Create an ATS-optimized resume with these requirements:
1. Use standard section headers: "Professional Summary", "Work Experience", "Education", "Skills", "Certifications" (if applicable)
2. Highlight relevant experience and skills that match the job description
3. Use bullet points for achievements and responsibilities
4. Include relevant keywords from the job description naturally
5. Keep formatting simple (no tables, clear hierarchy)
6. Quantify achievements where possible
7. Maintain all truthful information from original resume

Provide the enhanced resume in a clean, well-structured format with clear section breaks.
Use markdown headers (##) for main sections and bullet points (-) for lists."#;
