//! Term lookup: the primary queries against the requested vocabulary plus the
//! cross-vocabulary label index, assembled into one payload.
//!
//! ## Order of checks
//!
//! 1. Shape of `vocabulary` and `term` (400)
//! 2. Catalogue load (500 when unreadable)
//! 3. Vocabulary lookup and template rendering (404)
//! 4. Connectivity probe against the requested repository (500)
//! 5. Term and breadcrumb queries, concurrently (500, reported as an
//!    unreachable store)
//!
//! Steps 4-5 run alongside label aggregation and the release lookup; only
//! the primary path can fail the request, and its failure abandons the
//! enrichment work still in flight.

use std::sync::Arc;
use std::time::Instant;

use termgraph_core::{
    breadcrumb, classify, sanitize, Catalogue, CatalogueStore, GraphClientFactory,
    Error, QueryRenderer, Result, Row, TermId, TermPayload, TermRecord,
};
use tracing::{info, instrument};

use super::label_aggregator::LabelAggregator;
use super::release::ReleaseResolver;

#[derive(Clone)]
pub struct TermResolver {
    catalogue: Arc<dyn CatalogueStore>,
    clients: Arc<dyn GraphClientFactory>,
    labels: LabelAggregator,
    releases: ReleaseResolver,
}

impl TermResolver {
    pub fn new(
        catalogue: Arc<dyn CatalogueStore>,
        clients: Arc<dyn GraphClientFactory>,
        releases: ReleaseResolver,
    ) -> Self {
        Self {
            labels: LabelAggregator::new(clients.clone()),
            catalogue,
            clients,
            releases,
        }
    }

    #[instrument(skip(self), fields(subsystem = "api", component = "term_resolver", op = "resolve"))]
    pub async fn resolve(&self, vocabulary: &str, term: &str) -> Result<TermPayload> {
        let start = Instant::now();
        let vocabulary = sanitize::validate_vocabulary_name(vocabulary)?;
        let term = TermId::parse(term)?;

        let catalogue = self.catalogue.load().await?;
        let payload = self.resolve_in(&catalogue, vocabulary, &term).await?;

        info!(
            vocabulary,
            term = %term,
            result_count = payload.predicates.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Term resolved"
        );
        Ok(payload)
    }

    async fn resolve_in(
        &self,
        catalogue: &Catalogue,
        vocabulary: &str,
        term: &TermId,
    ) -> Result<TermPayload> {
        let config = catalogue.vocabulary(vocabulary)?;
        let renderer = QueryRenderer::new(config);
        let term_query = renderer.term_query(term)?;
        let breadcrumb_query = renderer.breadcrumb_query(term)?;

        let client = self.clients.client_for(config);
        let primary = async {
            client.probe().await?;
            let rows: (Vec<Row>, Vec<Row>) = tokio::try_join!(
                client.select(&term_query),
                client.select(&breadcrumb_query)
            )
            .map_err(store_failure)?;
            Ok::<_, Error>(rows)
        };
        let labels = async { Ok::<_, Error>(self.labels.aggregate(catalogue).await) };
        let version = async {
            Ok::<_, Error>(
                self.releases
                    .version_for(catalogue.github_owner(), config)
                    .await,
            )
        };

        let ((term_rows, crumb_rows), labels, version) =
            tokio::try_join!(primary, labels, version)?;

        let statements = classify::statements_from_rows(&term_rows);
        let mut record = TermRecord::new(term.as_str(), &config.name, version);
        classify::classify(&mut record, &statements, catalogue.languages.as_slice());

        Ok(TermPayload {
            predicates: statements,
            term_data: record,
            bread_crumbs_data: breadcrumb::assemble(&config.name, term.as_str(), &crumb_rows),
            all_concept_map: labels.index.into_entries(),
        })
    }
}

/// A primary query that fails after a successful connectivity check still
/// means the requested store cannot answer.
fn store_failure(err: Error) -> Error {
    match err {
        Error::Query(detail) => Error::StoreUnreachable(detail),
        other => other,
    }
}
