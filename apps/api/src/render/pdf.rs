//! Paginated PDF emission for the classified markup elements.
//!
//! Layout is computed first as a list of placed lines (page index, x,
//! baseline), then emitted through printpdf's builtin Helvetica faces.
//! Keeping placement separate from emission makes pagination testable
//! without parsing PDF bytes.
//!
//! Page geometry: US letter portrait (612 × 792 pt) with 0.75" margins.

use printpdf::{BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, Rgb};
use thiserror::Error;

use crate::render::font_metrics::{get_metrics, FontFace};
use crate::render::markup::{parse_markup, Element};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

const PAGE_WIDTH_PT: f32 = 612.0;
const PAGE_HEIGHT_PT: f32 = 792.0;
const MARGIN_PT: f32 = 54.0; // 0.75 inch
const TEXT_WIDTH_PT: f32 = PAGE_WIDTH_PT - 2.0 * MARGIN_PT;

const BULLET_GLYPH: &str = "\u{2022} ";

/// Text styling for one element class.
struct Style {
    face: FontFace,
    size_pt: f32,
    leading_pt: f32,
    space_before_pt: f32,
    space_after_pt: f32,
    indent_pt: f32,
    color: (f32, f32, f32),
}

const DARK_SLATE: (f32, f32, f32) = (0.204, 0.286, 0.369); // #34495E
const MIDNIGHT: (f32, f32, f32) = (0.173, 0.243, 0.314); // #2C3E50
const BLACK: (f32, f32, f32) = (0.0, 0.0, 0.0);

/// Section headers: 0.15" spacer + 12pt before, 8pt + 0.05" spacer after.
const SECTION_HEADER: Style = Style {
    face: FontFace::HelveticaBold,
    size_pt: 13.0,
    leading_pt: 16.0,
    space_before_pt: 22.8,
    space_after_pt: 11.6,
    indent_pt: 0.0,
    color: DARK_SLATE,
};

const SUBSECTION_HEADER: Style = Style {
    face: FontFace::HelveticaBold,
    size_pt: 11.0,
    leading_pt: 13.0,
    space_before_pt: 6.0,
    space_after_pt: 4.0,
    indent_pt: 0.0,
    color: MIDNIGHT,
};

const BODY: Style = Style {
    face: FontFace::Helvetica,
    size_pt: 10.0,
    leading_pt: 14.0,
    space_before_pt: 0.0,
    space_after_pt: 4.0,
    indent_pt: 0.0,
    color: BLACK,
};

const BULLET: Style = Style {
    face: FontFace::Helvetica,
    size_pt: 10.0,
    leading_pt: 14.0,
    space_before_pt: 0.0,
    space_after_pt: 4.0,
    indent_pt: 20.0,
    color: BLACK,
};

/// One line of text placed on a concrete page.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlacedLine {
    pub page: usize,
    pub x_pt: f32,
    pub baseline_pt: f32,
    pub text: String,
    pub face: FontFace,
    pub size_pt: f32,
    pub color: (f32, f32, f32),
}

/// Flows elements down the page, breaking to a new page whenever the next
/// line would cross the bottom margin. Vertical spacing never forces a
/// break on its own — only text lines do.
pub(crate) fn layout(elements: &[Element]) -> Vec<PlacedLine> {
    let mut placed: Vec<PlacedLine> = Vec::new();
    let mut page = 0usize;
    let mut y = PAGE_HEIGHT_PT - MARGIN_PT;

    let mut emit = |element_text: &str, style: &Style, page: &mut usize, y: &mut f32| {
        let metrics = get_metrics(style.face);
        let max_width_em = (TEXT_WIDTH_PT - style.indent_pt) / style.size_pt;

        *y -= style.space_before_pt;
        for line in metrics.wrap_words(element_text, max_width_em) {
            if *y - style.leading_pt < MARGIN_PT {
                *page += 1;
                *y = PAGE_HEIGHT_PT - MARGIN_PT;
            }
            *y -= style.leading_pt;
            placed.push(PlacedLine {
                page: *page,
                x_pt: MARGIN_PT + style.indent_pt,
                baseline_pt: *y,
                text: line,
                face: style.face,
                size_pt: style.size_pt,
                color: style.color,
            });
        }
        *y -= style.space_after_pt;
    };

    for element in elements {
        match element {
            Element::SectionHeader(text) => emit(text, &SECTION_HEADER, &mut page, &mut y),
            Element::SubsectionHeader(text) => emit(text, &SUBSECTION_HEADER, &mut page, &mut y),
            Element::Bullet(text) => {
                let text = format!("{BULLET_GLYPH}{text}");
                emit(&text, &BULLET, &mut page, &mut y);
            }
            Element::Body(text) => emit(text, &BODY, &mut page, &mut y),
        }
    }

    placed
}

fn pt_to_mm(v: f32) -> Mm {
    Mm(v * 25.4 / 72.0)
}

/// Renders markdown-dialect text into a complete in-memory PDF.
///
/// Empty input produces a valid single-page document with no content.
pub fn render_pdf(markdown: &str) -> Result<Vec<u8>, RenderError> {
    let elements = parse_markup(markdown);
    let lines = layout(&elements);

    let (doc, first_page, first_layer) = PdfDocument::new(
        "Customized Resume",
        pt_to_mm(PAGE_WIDTH_PT),
        pt_to_mm(PAGE_HEIGHT_PT),
        "content",
    );

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    let page_count = lines.iter().map(|l| l.page + 1).max().unwrap_or(1);
    let mut layers = vec![doc.get_page(first_page).get_layer(first_layer)];
    for _ in 1..page_count {
        let (page, layer) = doc.add_page(pt_to_mm(PAGE_WIDTH_PT), pt_to_mm(PAGE_HEIGHT_PT), "content");
        layers.push(doc.get_page(page).get_layer(layer));
    }

    for line in &lines {
        let layer = &layers[line.page];
        let (r, g, b) = line.color;
        layer.set_fill_color(Color::Rgb(Rgb::new(r.into(), g.into(), b.into(), None)));
        let font: &IndirectFontRef = match line.face {
            FontFace::Helvetica => &regular,
            FontFace::HelveticaBold => &bold,
        };
        layer.use_text(
            line.text.clone(),
            line.size_pt,
            pt_to_mm(line.x_pt),
            pt_to_mm(line.baseline_pt),
            font,
        );
    }

    doc.save_to_bytes().map_err(|e| RenderError::Pdf(e.to_string()))
}
