// Markup renderer: constrained markdown dialect → paginated PDF bytes.
// Classification is a pure line pass; placement and emission are separate
// so pagination stays testable. CPU-bound — callers run render_pdf inside
// tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod markup;
pub mod pdf;

pub use pdf::{render_pdf, RenderError};
