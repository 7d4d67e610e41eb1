//! Bibliographic metadata extraction
//!
//! Pattern-matches raw document text against English, line-labeled fields
//! such as `Title: ...` or `Authors: ...`. This only works for documents
//! whose first page literally carries those labels; arbitrary publisher
//! layouts fall through to the sentinel defaults. There is no attempt to
//! parse real bibliographic structure.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_AUTHORS: &str = "Unknown Authors";
pub const UNKNOWN_DATE: &str = "Unknown Date";
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

// Single-line fields: the value is the rest of the labeled line.
static TITLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Title:[ \t]*(.*)").unwrap()
});

static AUTHORS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Authors?:[ \t]*(.*)").unwrap()
});

static DATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Publication Date:[ \t]*(.*)").unwrap()
});

static LOCATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Location:[ \t]*(.*)").unwrap()
});

// Multi-line: everything after the label up to the first blank line.
static ABSTRACT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)Abstract:\s*(.*?)\n\n").unwrap()
});

/// Fields recovered from a document's text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedMetadata {
    pub title: String,
    pub authors: String,
    pub publication_date: String,
    pub location: String,
    pub abstract_text: String,
}

/// Extract labeled metadata from raw text. Never fails.
///
/// Each field is searched independently and the first occurrence wins.
/// A label whose value is blank counts as a miss.
pub fn extract_metadata(text: &str) -> ExtractedMetadata {
    ExtractedMetadata {
        title: first_capture(&TITLE_REGEX, text).unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        authors: first_capture(&AUTHORS_REGEX, text)
            .unwrap_or_else(|| UNKNOWN_AUTHORS.to_string()),
        publication_date: first_capture(&DATE_REGEX, text)
            .unwrap_or_else(|| UNKNOWN_DATE.to_string()),
        location: first_capture(&LOCATION_REGEX, text)
            .unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
        abstract_text: first_capture(&ABSTRACT_REGEX, text).unwrap_or_default(),
    }
}

fn first_capture(regex: &Regex, text: &str) -> Option<String> {
    regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|value| !value.is_empty())
}
