//! # termgraph-core
//!
//! Core types, traits, and resolution algorithms for the termgraph
//! vocabulary catalogue.
//!
//! This crate turns flat graph-store result rows into presentation-ready
//! structures: a [`TermRecord`], a [`BreadcrumbPath`], and a [`LabelIndex`].
//! It performs no I/O besides reading the catalogue file; graph access goes
//! through the [`GraphQueryClient`] trait.

pub mod breadcrumb;
pub mod classify;
pub mod config;
pub mod defaults;
pub mod error;
pub mod labels;
pub mod logging;
pub mod models;
pub mod sanitize;
pub mod template;
pub mod traits;
pub mod vocab;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types at crate root
pub use config::{
    Catalogue, FileCatalogueStore, QueryTemplates, StaticCatalogueStore, VocabularyConfig,
};
pub use error::{Error, Result};
pub use labels::{LabelIndex, LabelInsert};
pub use models::*;
pub use sanitize::{sanitize_identifier, validate_vocabulary_name, TermId};
pub use template::{QueryKind, QueryRenderer};
pub use traits::*;
pub use vocab::Predicate;
