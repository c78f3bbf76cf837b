//! Query template rendering.
//!
//! Templates come from the catalogue and contain a literal `${term}`
//! placeholder. Substitution is plain text replacement of every occurrence;
//! the substituted value is never re-scanned for placeholders.

use std::fmt;

use crate::config::VocabularyConfig;
use crate::defaults::TERM_PLACEHOLDER;
use crate::error::{Error, Result};
use crate::sanitize::TermId;

/// The queries a vocabulary can be asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Term,
    Breadcrumbs,
    AllLabels,
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Term => write!(f, "term"),
            Self::Breadcrumbs => write!(f, "breadcrumbs"),
            Self::AllLabels => write!(f, "all_labels"),
        }
    }
}

/// Substitute `term` for every `${term}` in `template`.
pub fn render(template: &str, term: &TermId) -> String {
    template.replace(TERM_PLACEHOLDER, term.as_str())
}

/// Renders the configured templates of one vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct QueryRenderer<'a> {
    vocabulary: &'a VocabularyConfig,
}

impl<'a> QueryRenderer<'a> {
    pub fn new(vocabulary: &'a VocabularyConfig) -> Self {
        Self { vocabulary }
    }

    fn template(&self, kind: QueryKind) -> Result<&'a str> {
        let queries = &self.vocabulary.queries;
        let template = match kind {
            QueryKind::Term => queries.term.as_deref(),
            QueryKind::Breadcrumbs => queries.breadcrumbs.as_deref(),
            QueryKind::AllLabels => queries.all_labels.as_deref(),
        };
        match template {
            Some(t) if !t.trim().is_empty() => Ok(t),
            _ => Err(Error::ConfigMissing(format!(
                "No {} query configured for vocabulary: {}",
                kind, self.vocabulary.name
            ))),
        }
    }

    pub fn term_query(&self, term: &TermId) -> Result<String> {
        Ok(render(self.template(QueryKind::Term)?, term))
    }

    pub fn breadcrumb_query(&self, term: &TermId) -> Result<String> {
        Ok(render(self.template(QueryKind::Breadcrumbs)?, term))
    }

    /// The all-labels query takes no term.
    pub fn all_labels_query(&self) -> Result<String> {
        Ok(self.template(QueryKind::AllLabels)?.to_string())
    }
}
