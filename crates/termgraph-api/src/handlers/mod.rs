//! HTTP handlers for termgraph-api.

pub mod health;
pub mod labels;
pub mod terms;
pub mod vocabularies;

pub use health::health_check;
pub use labels::get_concept_labels;
pub use terms::get_term;
pub use vocabularies::{get_repository_info, list_vocabularies};
