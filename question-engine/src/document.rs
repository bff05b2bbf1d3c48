//! PDF text extraction for document-mode generation.
//!
//! Walks each page's content stream and collects the strings passed to the
//! text-showing operators. Layout is approximated: positioning operators
//! start a new line, everything else is joined with single spaces.

use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};
use thiserror::Error;
use tracing::{debug, warn};

/// Upper bound on document characters forwarded to the model.
pub const DEFAULT_MAX_DOCUMENT_CHARS: usize = 15_000;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("not a readable PDF: {0}")]
    Parse(#[from] lopdf::Error),

    #[error("PDF is encrypted and its content is not accessible")]
    Encrypted,

    #[error("PDF contains no extractable text")]
    NoText,
}

/// Extracts normalized text from PDF bytes.
///
/// Pages whose content stream cannot be decoded are skipped. Fails with
/// [`DocumentError::NoText`] when nothing readable remains.
pub fn extract_text(bytes: &[u8]) -> Result<String, DocumentError> {
    let doc = Document::load_mem(bytes)?;
    // lopdf tries the empty user password on load.
    if doc.is_encrypted() {
        return Err(DocumentError::Encrypted);
    }

    let pages = doc.get_pages();
    let mut out = String::new();
    for (page_num, &page_id) in pages.iter() {
        let raw = match page_text(&doc, page_id) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(page = page_num, error = %err, "skipping unreadable page");
                continue;
            }
        };
        let text = normalize(&raw);
        if text.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&text);
    }

    debug!(pages = pages.len(), chars = out.chars().count(), "pdf text extracted");
    if out.is_empty() {
        return Err(DocumentError::NoText);
    }
    Ok(out)
}

/// Returns at most `max_chars` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn page_text(doc: &Document, page_id: ObjectId) -> Result<String, lopdf::Error> {
    let content = Content::decode(&doc.get_page_content(page_id)?)?;
    let mut text = String::new();

    for op in &content.operations {
        match op.operator.as_str() {
            "Tj" | "TJ" => push_operands(&mut text, &op.operands),
            // `'` and `"` move to the next line before showing.
            "'" | "\"" => {
                new_line(&mut text);
                push_operands(&mut text, &op.operands);
            }
            "Td" | "TD" | "T*" | "ET" => new_line(&mut text),
            _ => {}
        }
    }
    Ok(text)
}

fn push_operands(text: &mut String, operands: &[Object]) {
    for operand in operands {
        if let Some(s) = string_from_object(operand) {
            text.push_str(&s);
            text.push(' ');
        }
    }
}

fn new_line(text: &mut String) {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
}

fn string_from_object(obj: &Object) -> Option<String> {
    match obj {
        Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
        // TJ arrays mix strings with kerning numbers.
        Object::Array(items) => {
            let joined: String = items.iter().filter_map(string_from_object).collect();
            (!joined.is_empty()).then_some(joined)
        }
        _ => None,
    }
}

/// UTF-16BE when the BOM is present, otherwise Latin-1.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if let [0xFE, 0xFF, rest @ ..] = bytes {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    bytes.iter().map(|&b| b as char).collect()
}

/// Collapses runs of whitespace within each line and drops blank lines.
fn normalize(raw: &str) -> String {
    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
