//! Cross-vocabulary label index construction.
//!
//! Every configured vocabulary's all-labels query is dispatched at once and
//! joined with a barrier. A vocabulary whose fetch fails contributes nothing;
//! the failure is logged and counted, never returned. Results are merged in
//! configured vocabulary order so first-write-wins is deterministic.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use termgraph_core::{
    Catalogue, Error, GraphClientFactory, LabelIndex, QueryRenderer, Result, Row,
    VocabularyConfig,
};
use tracing::{debug, info, instrument, warn};

/// Outcome of one aggregation run.
#[derive(Debug, Default)]
pub struct AggregatedLabels {
    pub index: LabelIndex,
    /// Vocabularies whose labels are missing from `index`.
    pub failed_sources: Vec<String>,
}

#[derive(Clone)]
pub struct LabelAggregator {
    clients: Arc<dyn GraphClientFactory>,
}

impl LabelAggregator {
    pub fn new(clients: Arc<dyn GraphClientFactory>) -> Self {
        Self { clients }
    }

    #[instrument(skip(self, catalogue), fields(subsystem = "api", component = "label_aggregator", op = "aggregate", source_count = catalogue.vocabularies.len()))]
    pub async fn aggregate(&self, catalogue: &Catalogue) -> AggregatedLabels {
        let start = Instant::now();
        let names = catalogue.names();

        let fetches = catalogue
            .vocabularies
            .iter()
            .map(|vocabulary| self.fetch(vocabulary));
        let results = join_all(fetches).await;

        let mut aggregated = AggregatedLabels::default();
        for (vocabulary, result) in catalogue.vocabularies.iter().zip(results) {
            match result {
                Ok(rows) => aggregated.index.merge_rows(&rows, names.as_slice()),
                Err(e) => {
                    warn!(vocabulary = %vocabulary.name, error = %e, "Label source skipped");
                    aggregated.failed_sources.push(vocabulary.name.clone());
                }
            }
        }

        info!(
            result_count = aggregated.index.len(),
            duplicate_count = aggregated.index.duplicates(),
            rejected_count = aggregated.index.rejected(),
            failed_sources = aggregated.failed_sources.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Label index built"
        );
        aggregated
    }

    async fn fetch(&self, vocabulary: &VocabularyConfig) -> Result<Vec<Row>> {
        let query = QueryRenderer::new(vocabulary)
            .all_labels_query()
            .map_err(|e| Error::LabelSource(e.to_string()))?;
        let client = self.clients.client_for(vocabulary);
        let rows = client
            .select(&query)
            .await
            .map_err(|e| Error::LabelSource(format!("{}: {}", client.endpoint(), e)))?;
        debug!(vocabulary = %vocabulary.name, result_count = rows.len(), "Label rows fetched");
        Ok(rows)
    }
}
