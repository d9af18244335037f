//! Line classifier for the constrained markdown dialect the customization
//! stage emits: `## ` section headers, `### ` or `**wrapped**` subsection
//! headers, `- `/`* ` bullets, `**bold**` markers (stripped), everything
//! else body text.
//!
//! Classification is a pure single pass: each non-blank line matches the
//! FIRST applicable rule, in the exact order below. No cross-line state.

/// One renderable unit of the paginated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    SectionHeader(String),
    SubsectionHeader(String),
    Bullet(String),
    Body(String),
}

/// Removes all bold markers from a line. The plain renderer does not
/// support inline emphasis, so `**` pairs (and strays) are dropped.
fn strip_bold(text: &str) -> String {
    text.replace("**", "")
}

/// Returns true if the entire trimmed line is wrapped in one bold pair.
fn is_bold_wrapped(line: &str) -> bool {
    line.starts_with("**") && line.ends_with("**") && line.len() > 4
}

/// Classifies a single line. Returns `None` for blank lines and lines that
/// are empty once cleaned.
pub fn classify_line(raw: &str) -> Option<Element> {
    let line = raw.trim();
    if line.is_empty() {
        return None;
    }

    // Rule 1: level-2 header → section header.
    if let Some(rest) = line.strip_prefix("## ") {
        return Some(Element::SectionHeader(rest.trim().to_string()));
    }

    // Rule 2: level-3 header, or a whole line wrapped in bold markers.
    if let Some(rest) = line.strip_prefix("### ") {
        return Some(Element::SubsectionHeader(rest.trim().to_string()));
    }
    if is_bold_wrapped(line) {
        return Some(Element::SubsectionHeader(strip_bold(line).trim().to_string()));
    }

    // Rule 3: bullet. Bold markers inside the bullet text are stripped.
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return Some(Element::Bullet(strip_bold(rest.trim())));
    }

    // Rule 4: body text, bold markers stripped. Skip if nothing remains.
    let clean = strip_bold(line).trim().to_string();
    if clean.is_empty() {
        return None;
    }
    Some(Element::Body(clean))
}

/// Parses a full markdown document into its element sequence.
pub fn parse_markup(text: &str) -> Vec<Element> {
    text.lines().filter_map(classify_line).collect()
}
