// src/document/mod.rs
pub mod loader;

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Failed to compile WHITESPACE_RUN_RE"));

/// Full SPC text with every whitespace run (newlines included) collapsed to a
/// single space and the ends trimmed. Built once, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDocument {
    text: String,
}

impl NormalizedDocument {
    pub fn new(raw_text: &str) -> Self {
        let text = WHITESPACE_RUN_RE.replace_all(raw_text, " ").trim().to_string();
        tracing::trace!("Normalized {} raw bytes into {} bytes", raw_text.len(), text.len());
        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }
}

impl AsRef<str> for NormalizedDocument {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
