//! Section splitter: partitions résumé text on a fixed vocabulary of headers.
//!
//! Text before the first recognized header is discarded, and a document with
//! no recognized header yields no sections at all. Repeated headers produce
//! separate sections with the same name.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Headers recognized by the splitter, in canonical (upper-case) form.
pub const SECTION_HEADERS: &[&str] = &[
    "EDUCATION",
    "EXPERIENCE",
    "PROJECTS",
    "COMPETITIONS",
    "SKILLS",
    "CERTIFICATIONS",
];

/// A named, contiguous span of résumé text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Canonical upper-case header, one of `SECTION_HEADERS`.
    pub name: String,
    pub content: String,
}

impl Section {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Header keyword followed by any run of whitespace / colons.
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)(?P<header>{})[\s:]*", SECTION_HEADERS.join("|")))
        .expect("valid regex")
});

/// Splits `text` into sections, ordered as their headers appear.
pub fn split_sections(text: &str) -> Vec<Section> {
    let matches: Vec<_> = HEADER_RE.captures_iter(text).collect();

    matches
        .iter()
        .enumerate()
        .filter_map(|(i, caps)| {
            let whole = caps.get(0)?;
            let header = caps.name("header")?;
            let end = matches
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map(|m| m.start())
                .unwrap_or(text.len());

            Some(Section::new(
                header.as_str().to_uppercase(),
                text[whole.end()..end].trim(),
            ))
        })
        .collect()
}
