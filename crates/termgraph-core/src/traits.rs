//! Interfaces to the external collaborators of term resolution.
//!
//! These traits keep the resolver independent of the concrete graph store
//! and configuration source, enabling pluggable backends and testability.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{Catalogue, VocabularyConfig};
use crate::error::Result;
use crate::models::Row;

/// Client for one vocabulary repository.
#[async_trait]
pub trait GraphQueryClient: Send + Sync {
    /// Lightweight connectivity check. Fails with `StoreUnreachable`.
    async fn probe(&self) -> Result<()>;

    /// Execute a SELECT query and return its rows in result order.
    async fn select(&self, query: &str) -> Result<Vec<Row>>;

    /// Repository endpoint this client talks to.
    fn endpoint(&self) -> &str;
}

/// Builds request-scoped clients for configured vocabularies.
///
/// Implementations share connection pools between the clients they hand out;
/// the clients themselves hold no request state.
pub trait GraphClientFactory: Send + Sync {
    fn client_for(&self, vocabulary: &VocabularyConfig) -> Arc<dyn GraphQueryClient>;
}

/// Source of the vocabulary catalogue.
#[async_trait]
pub trait CatalogueStore: Send + Sync {
    /// Load the current catalogue. Fails with `Config` when unreadable.
    async fn load(&self) -> Result<Arc<Catalogue>>;
}
