//! Text extraction from uploaded resume files (PDF, DOCX, plain text).
//!
//! Dispatch is driven by the lowercased file extension of the uploaded
//! filename. Parser failures are caught and returned as `ExtractError`
//! values — the pipeline converts them into its degenerate outcome, they
//! never propagate as panics.

use std::io::Cursor;
use std::io::Read;

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported resume format: {0}")]
    UnsupportedFormat(String),

    #[error("PDF extraction error: {0}")]
    Pdf(String),

    #[error("DOCX extraction error: {0}")]
    Docx(String),

    #[error("text file is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Extracts the full textual content of an uploaded resume file.
///
/// Returns the text with one line per source line/paragraph. An empty
/// document yields `Ok("")` — absence of pages or paragraphs is not an
/// error here (the pipeline decides what to do with empty text).
pub fn extract_text(filename: &str, data: &[u8]) -> Result<String, ExtractError> {
    let lower = filename.to_lowercase();

    if lower.ends_with(".pdf") {
        extract_pdf(data)
    } else if lower.ends_with(".docx") {
        extract_docx(data)
    } else if lower.ends_with(".txt") {
        Ok(String::from_utf8(data.to_vec())?)
    } else {
        Err(ExtractError::UnsupportedFormat(filename.to_string()))
    }
}

/// Extracts text from a PDF byte buffer. Pages are concatenated in page
/// order with newline separators by the extraction backend.
fn extract_pdf(data: &[u8]) -> Result<String, ExtractError> {
    pdf_extract::extract_text_from_mem(data).map_err(|e| {
        warn!("PDF extraction failed: {e}");
        ExtractError::Pdf(e.to_string())
    })
}

/// Extracts text from a DOCX byte buffer.
///
/// A DOCX file is a ZIP archive; the document body lives in
/// `word/document.xml`. Each `<w:p>` paragraph's run text (`<w:t>`) is
/// concatenated with a trailing newline, in document order.
fn extract_docx(data: &[u8]) -> Result<String, ExtractError> {
    let cursor = Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor).map_err(|e| {
        warn!("DOCX is not a readable ZIP archive: {e}");
        ExtractError::Docx(format!("not a ZIP archive: {e}"))
    })?;

    let mut document_xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractError::Docx(format!("missing word/document.xml: {e}")))?
        .read_to_string(&mut document_xml)
        .map_err(|e| ExtractError::Docx(format!("failed to read document.xml: {e}")))?;

    paragraphs_from_document_xml(&document_xml)
}

/// Streams `word/document.xml` and collects paragraph text.
fn paragraphs_from_document_xml(xml: &str) -> Result<String, ExtractError> {
    let mut reader = Reader::from_str(xml);

    let mut text = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_run_text = true;
                }
            }
            Ok(Event::Text(t)) if in_run_text => {
                let content = t
                    .unescape()
                    .map_err(|e| ExtractError::Docx(format!("bad XML text content: {e}")))?;
                text.push_str(&content);
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"t" => in_run_text = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                warn!("DOCX XML parse failed: {e}");
                return Err(ExtractError::Docx(format!("malformed document.xml: {e}")));
            }
            _ => {}
        }
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    /// Builds a minimal in-memory DOCX containing the given document body XML.
    fn make_docx(document_xml: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    const TWO_PARAGRAPH_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
    <w:p><w:r><w:t>Software </w:t></w:r><w:r><w:t>Engineer</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn test_txt_extraction_preserves_content() {
        let text = extract_text("resume.txt", b"Jane Doe\nSoftware Engineer").unwrap();
        assert_eq!(text, "Jane Doe\nSoftware Engineer");
    }

    #[test]
    fn test_txt_extension_is_case_insensitive() {
        let text = extract_text("RESUME.TXT", b"Jane Doe").unwrap();
        assert_eq!(text, "Jane Doe");
    }

    #[test]
    fn test_empty_txt_returns_empty_string() {
        let text = extract_text("resume.txt", b"").unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_txt_invalid_utf8_is_error() {
        let err = extract_text("resume.txt", &[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, ExtractError::Utf8(_)));
    }

    #[test]
    fn test_unsupported_extension_is_error_not_panic() {
        let err = extract_text("resume.rtf", b"{\\rtf1}").unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_docx_concatenates_paragraphs_in_order() {
        let docx = make_docx(TWO_PARAGRAPH_BODY);
        let text = extract_text("resume.docx", &docx).unwrap();
        assert_eq!(text, "Jane Doe\nSoftware Engineer\n");
    }

    #[test]
    fn test_docx_with_no_paragraphs_yields_empty_string() {
        let docx = make_docx(
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body/></w:document>"#,
        );
        let text = extract_text("resume.docx", &docx).unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_docx_garbage_bytes_is_error() {
        let err = extract_text("resume.docx", b"definitely not a zip").unwrap_err();
        assert!(matches!(err, ExtractError::Docx(_)));
    }

    #[test]
    fn test_pdf_garbage_bytes_is_error() {
        let err = extract_text("resume.pdf", b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, ExtractError::Pdf(_)));
    }

    #[test]
    fn test_docx_text_outside_runs_is_ignored() {
        let docx = make_docx(
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:pPr>ignored</w:pPr><w:r><w:t>kept</w:t></w:r></w:p>
  </w:body>
</w:document>"#,
        );
        let text = extract_text("resume.docx", &docx).unwrap();
        assert_eq!(text, "kept\n");
    }
}
