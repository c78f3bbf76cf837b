//! Breadcrumb assembly.
//!
//! Projects `?narrowerConcept` rows onto a [`BreadcrumbPath`] in result order.
//! Ordering and acyclicity of the chain are the breadcrumb query's contract;
//! nothing here reorders, deduplicates, or checks for cycles.

use crate::models::{BreadcrumbPath, Row};

/// Binding name carrying each ancestor.
pub const NARROWER_CONCEPT: &str = "narrowerConcept";

/// Ancestor URIs in result order. Rows without a non-empty
/// `narrowerConcept` are skipped.
pub fn ancestors(rows: &[Row]) -> Vec<String> {
    rows.iter()
        .filter_map(|row| row.get(NARROWER_CONCEPT))
        .filter(|term| !term.value.is_empty())
        .map(|term| term.value.clone())
        .collect()
}

pub fn assemble(vocabulary: &str, term: &str, rows: &[Row]) -> BreadcrumbPath {
    BreadcrumbPath::new(vocabulary, term, ancestors(rows))
}
