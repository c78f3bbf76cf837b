//! Identifier sanitization for values interpolated into query templates.
//!
//! Two layers:
//! 1. Allow-list: length 1..=100 and only `[a-zA-Z0-9._-]`
//! 2. Strip pass removing `< > ' " ; & |`
//!
//! The strip pass can never change an identifier that passed the allow-list.
//! It stays so that a loosened pattern cannot silently open an injection path.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::defaults::{MAX_IDENTIFIER_LEN, MAX_VOCABULARY_LEN};
use crate::error::{Error, Result};

static IDENTIFIER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._-]+$").expect("identifier pattern is valid"));

static VOCABULARY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("vocabulary pattern is valid"));

/// Characters removed by the strip pass.
pub const UNSAFE_CHARS: &[char] = &['<', '>', '\'', '"', ';', '&', '|'];

/// A term identifier that is safe to embed in a query template verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TermId(String);

impl TermId {
    /// Validate and normalize a raw identifier from a request.
    pub fn parse(raw: &str) -> Result<Self> {
        sanitize_identifier(raw).map(TermId)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TermId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validate `raw` against the allow-list and strip unsafe characters.
pub fn sanitize_identifier(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Err(Error::InvalidIdentifier(
            "Term identifier must not be empty".to_string(),
        ));
    }

    let len = raw.chars().count();
    if len > MAX_IDENTIFIER_LEN {
        return Err(Error::InvalidIdentifier(format!(
            "Term identifier is {} characters long, maximum is {}",
            len, MAX_IDENTIFIER_LEN
        )));
    }

    if !IDENTIFIER_PATTERN.is_match(raw) {
        return Err(Error::InvalidIdentifier(
            "Term identifier may only contain letters, digits, '.', '_' and '-'".to_string(),
        ));
    }

    Ok(strip_unsafe(raw))
}

/// Remove every character in [`UNSAFE_CHARS`].
pub fn strip_unsafe(value: &str) -> String {
    value.chars().filter(|c| !UNSAFE_CHARS.contains(c)).collect()
}

/// Check the shape of a vocabulary name before it is looked up.
pub fn validate_vocabulary_name(raw: &str) -> Result<&str> {
    if raw.is_empty() {
        return Err(Error::InvalidInput(
            "Vocabulary parameter must not be empty".to_string(),
        ));
    }
    if raw.chars().count() > MAX_VOCABULARY_LEN {
        return Err(Error::InvalidInput(format!(
            "Vocabulary parameter exceeds {} characters",
            MAX_VOCABULARY_LEN
        )));
    }
    if !VOCABULARY_PATTERN.is_match(raw) {
        return Err(Error::InvalidInput(
            "Vocabulary parameter may only contain letters, digits, '_' and '-'".to_string(),
        ));
    }
    Ok(raw)
}
