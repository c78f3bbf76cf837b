use std::sync::Arc;

use termgraph_core::{CatalogueStore, GraphClientFactory};

use crate::services::{LabelAggregator, ReleaseResolver, TermResolver};

/// Shared handler state. Holds no request data; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub catalogue: Arc<dyn CatalogueStore>,
    pub resolver: TermResolver,
    pub labels: LabelAggregator,
}

impl AppState {
    pub fn new(
        catalogue: Arc<dyn CatalogueStore>,
        clients: Arc<dyn GraphClientFactory>,
        releases: ReleaseResolver,
    ) -> Self {
        Self {
            resolver: TermResolver::new(catalogue.clone(), clients.clone(), releases),
            labels: LabelAggregator::new(clients),
            catalogue,
        }
    }
}
