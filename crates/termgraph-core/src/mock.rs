//! In-memory graph client for deterministic testing.
//!
//! ```rust,ignore
//! use termgraph_core::mock::MockGraphClient;
//! use termgraph_core::GraphQueryClient;
//!
//! #[tokio::test]
//! async fn test_with_mock_client() {
//!     let client = MockGraphClient::new("http://mock/repositories/a")
//!         .with_rows("prefLabel", vec![]);
//!     assert!(client.select("SELECT ?prefLabel").await.unwrap().is_empty());
//! }
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::config::VocabularyConfig;
use crate::error::{Error, Result};
use crate::models::Row;
use crate::traits::{GraphClientFactory, GraphQueryClient};

#[derive(Debug, Clone)]
enum Canned {
    Rows(Vec<Row>),
    Failure(String),
}

/// Graph client answering queries from canned responses.
///
/// A query is answered by the first registered response whose needle is a
/// substring of the query text. Unmatched queries return no rows.
#[derive(Debug, Clone)]
pub struct MockGraphClient {
    endpoint: String,
    reachable: bool,
    delay: Option<Duration>,
    responses: Vec<(String, Canned)>,
    call_log: Arc<Mutex<Vec<String>>>,
}

impl MockGraphClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            reachable: true,
            delay: None,
            responses: Vec::new(),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Make the connectivity probe fail.
    pub fn unreachable(mut self) -> Self {
        self.reachable = false;
        self
    }

    /// Hold every `select` answer for `delay` (tokio time, so paused-clock
    /// tests advance it instantly).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_rows(mut self, needle: impl Into<String>, rows: Vec<Row>) -> Self {
        self.responses.push((needle.into(), Canned::Rows(rows)));
        self
    }

    pub fn with_failure(mut self, needle: impl Into<String>, message: impl Into<String>) -> Self {
        self.responses
            .push((needle.into(), Canned::Failure(message.into())));
        self
    }

    /// Queries executed so far, probes recorded as `"PROBE"`.
    pub fn calls(&self) -> Vec<String> {
        self.call_log.lock().unwrap().clone()
    }

    fn record(&self, entry: &str) {
        self.call_log.lock().unwrap().push(entry.to_string());
    }
}

#[async_trait]
impl GraphQueryClient for MockGraphClient {
    async fn probe(&self) -> Result<()> {
        self.record("PROBE");
        if self.reachable {
            Ok(())
        } else {
            Err(Error::StoreUnreachable(format!(
                "{} is not reachable",
                self.endpoint
            )))
        }
    }

    async fn select(&self, query: &str) -> Result<Vec<Row>> {
        self.record(query);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self
            .responses
            .iter()
            .find(|(needle, _)| query.contains(needle.as_str()))
        {
            Some((_, Canned::Rows(rows))) => Ok(rows.clone()),
            Some((_, Canned::Failure(message))) => Err(Error::Query(message.clone())),
            None => Ok(Vec::new()),
        }
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Hands out mock clients keyed by vocabulary name.
///
/// Vocabularies without a registered client get one whose probe fails.
#[derive(Debug, Clone, Default)]
pub struct MockClientFactory {
    clients: HashMap<String, MockGraphClient>,
}

impl MockClientFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(mut self, vocabulary: impl Into<String>, client: MockGraphClient) -> Self {
        self.clients.insert(vocabulary.into(), client);
        self
    }

    pub fn client(&self, vocabulary: &str) -> Option<&MockGraphClient> {
        self.clients.get(vocabulary)
    }
}

impl GraphClientFactory for MockClientFactory {
    fn client_for(&self, vocabulary: &VocabularyConfig) -> Arc<dyn GraphQueryClient> {
        match self.clients.get(&vocabulary.name) {
            Some(client) => Arc::new(client.clone()),
            None => Arc::new(
                MockGraphClient::new(vocabulary.repository_url())
                    .unreachable()
                    .with_failure("", "no mock registered"),
            ),
        }
    }
}
