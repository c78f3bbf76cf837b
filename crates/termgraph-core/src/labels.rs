//! Cross-vocabulary label index.
//!
//! Maps concept URIs to display labels. The first label written for a URI is
//! kept; later ones are counted as duplicates and discarded. Subjects whose
//! URI does not look like `.../<vocabulary>/<term>` for a configured
//! vocabulary are rejected.

use std::collections::BTreeMap;

use tracing::trace;

use crate::defaults::LABEL_SUBJECT_MIN_SEGMENTS;
use crate::models::Row;

/// Outcome of offering one label to the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelInsert {
    Inserted,
    Duplicate,
    Rejected,
}

/// Per-request label index.
#[derive(Debug, Clone, Default)]
pub struct LabelIndex {
    entries: BTreeMap<String, String>,
    duplicates: usize,
    rejected: usize,
}

impl LabelIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a label. `vocabularies` are the configured vocabulary names.
    pub fn insert<S: AsRef<str>>(
        &mut self,
        subject: &str,
        label: &str,
        vocabularies: &[S],
    ) -> LabelInsert {
        if self.entries.contains_key(subject) {
            trace!(subject, label, "Duplicate label discarded");
            self.duplicates += 1;
            return LabelInsert::Duplicate;
        }
        if subject.is_empty() || label.is_empty() || !is_in_scope(subject, vocabularies) {
            trace!(subject, "Label subject out of scope");
            self.rejected += 1;
            return LabelInsert::Rejected;
        }
        self.entries.insert(subject.to_string(), label.to_string());
        LabelInsert::Inserted
    }

    /// Merge `?subject ?label` rows in order.
    pub fn merge_rows<S: AsRef<str>>(&mut self, rows: &[Row], vocabularies: &[S]) {
        for row in rows {
            let subject = row.get("subject").map(|t| t.value.as_str()).unwrap_or("");
            let label = row.get("label").map(|t| t.value.as_str()).unwrap_or("");
            self.insert(subject, label, vocabularies);
        }
    }

    pub fn get(&self, uri: &str) -> Option<&str> {
        self.entries.get(uri).map(String::as_str)
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.entries.contains_key(uri)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Labels discarded because the URI was already indexed.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Labels discarded because the subject was out of scope or incomplete.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    pub fn into_entries(self) -> BTreeMap<String, String> {
        self.entries
    }

    /// Label for `uri`, or its last path segment in brackets.
    pub fn display_label(&self, uri: &str) -> String {
        match self.get(uri) {
            Some(label) => label.to_string(),
            None => format!("[{}]", last_segment(uri)),
        }
    }

    /// Label for `uri`, or the URI itself.
    pub fn label_or_uri<'a>(&'a self, uri: &'a str) -> &'a str {
        self.get(uri).unwrap_or(uri)
    }
}

/// True when `subject` has at least five `/`-separated segments, a
/// non-empty last segment, and a configured vocabulary name as its
/// second-to-last segment.
pub fn is_in_scope<S: AsRef<str>>(subject: &str, vocabularies: &[S]) -> bool {
    let parts: Vec<&str> = subject.split('/').collect();
    if parts.len() < LABEL_SUBJECT_MIN_SEGMENTS {
        return false;
    }
    let term = parts[parts.len() - 1];
    let vocabulary = parts[parts.len() - 2];
    !term.is_empty() && vocabularies.iter().any(|v| v.as_ref() == vocabulary)
}

/// Last path segment of a URI, treating the first `#` as a separator.
pub fn last_segment(uri: &str) -> String {
    let normalized = uri.replacen('#', "/", 1);
    normalized
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}
