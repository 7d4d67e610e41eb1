//! PDF text extraction module
//!
//! Extracts text content from PDF files using lopdf. Pages are read in
//! page order and their text is concatenated. Line breaks between text
//! blocks are kept because metadata extraction works line by line.

use crate::errors::IngestionError;
use std::path::Path;
use tracing::{debug, warn};

/// Source of raw document text
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, path: &Path) -> Result<String, IngestionError>;
}

/// lopdf-backed extractor for stored PDF files
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, IngestionError> {
        extract_text_from_pdf(path)
    }
}

/// Extract text content from a PDF file
pub fn extract_text_from_pdf(path: &Path) -> Result<String, IngestionError> {
    let doc = lopdf::Document::load(path).map_err(|e| IngestionError::PdfParseError {
        path: path.display().to_string(),
        message: format!("Failed to load PDF: {}", e),
    })?;

    let mut text = String::new();
    let pages = doc.get_pages();

    debug!(page_count = pages.len(), "Extracting text from PDF");

    for page_num in pages.keys() {
        match extract_page_text(&doc, *page_num) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => {
                warn!(page = page_num, error = %e, "Failed to extract text from page, skipping");
            }
        }
    }

    if text.trim().is_empty() {
        warn!(path = %path.display(), "No text content extracted from PDF");
    }

    let cleaned = clean_text(&text);

    debug!(
        original_len = text.len(),
        cleaned_len = cleaned.len(),
        "Text extraction complete"
    );

    Ok(cleaned)
}

/// Extract text from a single page.
///
/// Uses lopdf's font-aware extraction first and falls back to scanning the
/// raw content stream when the page's fonts cannot be resolved.
fn extract_page_text(doc: &lopdf::Document, page_num: u32) -> Result<String, String> {
    match doc.extract_text(&[page_num]) {
        Ok(text) => Ok(text),
        Err(e) => {
            debug!(page = page_num, error = %e, "Font-aware extraction failed, scanning content stream");

            let page_id = doc
                .get_pages()
                .get(&page_num)
                .copied()
                .ok_or_else(|| format!("Page {} not found", page_num))?;

            let content = doc.get_page_content(page_id).map_err(|e| e.to_string())?;
            Ok(extract_text_from_content(&content))
        }
    }
}

/// Extract text from PDF content stream
fn extract_text_from_content(content: &[u8]) -> String {
    // Text showing operators between BT and ET; each block becomes one line
    let content_str = String::from_utf8_lossy(content);
    let mut text = String::new();
    let mut in_text_block = false;
    let mut current_text = String::new();

    for line in content_str.lines() {
        let trimmed = line.trim();

        if trimmed == "BT" {
            in_text_block = true;
            continue;
        }

        if trimmed == "ET" {
            in_text_block = false;
            text.push_str(&current_text);
            text.push('\n');
            current_text.clear();
            continue;
        }

        if in_text_block {
            if let Some(text_content) = extract_text_from_operator(trimmed) {
                current_text.push_str(&text_content);
            }
        }
    }

    text
}

/// Extract text from a PDF text operator
fn extract_text_from_operator(line: &str) -> Option<String> {
    // (text) Tj, (text) ' and (text) "
    if line.ends_with("Tj") || line.ends_with('\'') || line.ends_with('"') {
        let start = line.find('(')?;
        let end = line.rfind(')')?;
        if end > start {
            return Some(decode_pdf_string(&line[start + 1..end]));
        }
        return None;
    }

    // [(text) num (text) num] TJ
    if line.ends_with("TJ") {
        let mut result = String::new();
        let mut in_paren = false;
        let mut current = String::new();

        for ch in line.chars() {
            match ch {
                '(' => {
                    in_paren = true;
                }
                ')' => {
                    in_paren = false;
                    result.push_str(&decode_pdf_string(&current));
                    current.clear();
                }
                _ if in_paren => {
                    current.push(ch);
                }
                _ => {}
            }
        }

        if !result.is_empty() {
            return Some(result);
        }
    }

    None
}

/// Decode PDF string escapes
fn decode_pdf_string(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('r') => result.push('\r'),
                Some('t') => result.push('\t'),
                Some('\\') => result.push('\\'),
                Some('(') => result.push('('),
                Some(')') => result.push(')'),
                Some(c) => result.push(c),
                None => {}
            }
        } else {
            result.push(ch);
        }
    }

    result
}

/// Normalize line endings and drop byte-order marks; line structure is kept
fn clean_text(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\u{FEFF}', "")
}
