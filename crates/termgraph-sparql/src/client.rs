//! HTTP client for RDF4J/GraphDB-style SPARQL repositories.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use tracing::{debug, info, instrument, warn};

use termgraph_core::defaults::{
    PROBE_TIMEOUT_SECS, QUERY_TIMEOUT_SECS, SPARQL_QUERY, SPARQL_RESULTS_JSON,
};
use termgraph_core::{
    Error, GraphClientFactory, GraphQueryClient, Result, Row, VocabularyConfig,
};

use crate::results::parse_select;

/// Queries slower than this are logged at WARN.
const SLOW_QUERY_MS: u64 = 5000;

/// Timeouts applied to every request a [`SparqlClient`] issues.
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    pub query: Duration,
    pub probe: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            query: Duration::from_secs(QUERY_TIMEOUT_SECS),
            probe: Duration::from_secs(PROBE_TIMEOUT_SECS),
        }
    }
}

impl Timeouts {
    /// Read `TERMGRAPH_QUERY_TIMEOUT_SECS` and `TERMGRAPH_PROBE_TIMEOUT_SECS`,
    /// falling back to the defaults for unset or unparsable values.
    pub fn from_env() -> Self {
        let query = std::env::var("TERMGRAPH_QUERY_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(QUERY_TIMEOUT_SECS);

        let probe = std::env::var("TERMGRAPH_PROBE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(PROBE_TIMEOUT_SECS);

        Self {
            query: Duration::from_secs(query),
            probe: Duration::from_secs(probe),
        }
    }
}

#[derive(Clone)]
struct Credentials {
    username: String,
    password: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// SPARQL client bound to a single repository.
#[derive(Debug, Clone)]
pub struct SparqlClient {
    client: Client,
    server_url: String,
    repository_url: String,
    credentials: Option<Credentials>,
    timeouts: Timeouts,
}

impl SparqlClient {
    /// Create a client for a vocabulary's repository, sharing `client`'s
    /// connection pool.
    pub fn new(client: Client, vocabulary: &VocabularyConfig, timeouts: Timeouts) -> Self {
        let credentials = vocabulary
            .username
            .as_ref()
            .filter(|u| !u.is_empty())
            .map(|username| Credentials {
                username: username.clone(),
                password: vocabulary.password.clone(),
            });

        Self {
            client,
            server_url: vocabulary.server_url().to_string(),
            repository_url: vocabulary.repository_url(),
            credentials,
            timeouts,
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some(c) => request.basic_auth(&c.username, c.password.as_deref()),
            None => request,
        }
    }
}

#[async_trait]
impl GraphQueryClient for SparqlClient {
    #[instrument(skip(self), fields(subsystem = "sparql", component = "sparql_client", op = "probe", endpoint = %self.repository_url))]
    async fn probe(&self) -> Result<()> {
        let request = self
            .client
            .get(format!("{}/repositories", self.server_url))
            .header(ACCEPT, SPARQL_RESULTS_JSON)
            .timeout(self.timeouts.probe);

        match self.authorize(request).send().await {
            Ok(resp) if resp.status().is_success() => {
                debug!("Graph store probe passed");
                Ok(())
            }
            Ok(resp) => {
                warn!(status = %resp.status(), "Graph store probe failed");
                Err(Error::StoreUnreachable(format!(
                    "{} returned {}",
                    self.server_url,
                    resp.status()
                )))
            }
            Err(e) => {
                warn!(error = %e, "Graph store probe error");
                Err(Error::StoreUnreachable(format!(
                    "{} is not reachable: {}",
                    self.server_url, e
                )))
            }
        }
    }

    #[instrument(skip(self, query), fields(subsystem = "sparql", component = "sparql_client", op = "select", endpoint = %self.repository_url, query_len = query.len()))]
    async fn select(&self, query: &str) -> Result<Vec<Row>> {
        let start = Instant::now();
        debug!(query, "Executing SPARQL query");

        let request = self
            .client
            .post(&self.repository_url)
            .header(CONTENT_TYPE, SPARQL_QUERY)
            .header(ACCEPT, SPARQL_RESULTS_JSON)
            .timeout(self.timeouts.query)
            .body(query.to_string());

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| Error::Query(format!("Request to {} failed: {}", self.repository_url, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Query(format!(
                "{} returned {}: {}",
                self.repository_url, status, body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Query(format!("Failed to read response: {}", e)))?;
        let rows = parse_select(&body)?;
        let elapsed = start.elapsed().as_millis() as u64;

        debug!(
            result_count = rows.len(),
            duration_ms = elapsed,
            "SPARQL query complete"
        );
        if elapsed > SLOW_QUERY_MS {
            warn!(duration_ms = elapsed, slow = true, "Slow SPARQL query");
        }
        Ok(rows)
    }

    fn endpoint(&self) -> &str {
        &self.repository_url
    }
}

/// Builds [`SparqlClient`]s that share one connection pool.
#[derive(Debug, Clone)]
pub struct SparqlClientFactory {
    client: Client,
    timeouts: Timeouts,
}

impl SparqlClientFactory {
    pub fn new(timeouts: Timeouts) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("termgraph/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            query_timeout_secs = timeouts.query.as_secs(),
            probe_timeout_secs = timeouts.probe.as_secs(),
            "Initializing SPARQL client factory"
        );

        Ok(Self { client, timeouts })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(Timeouts::from_env())
    }

    pub fn timeouts(&self) -> Timeouts {
        self.timeouts
    }
}

impl GraphClientFactory for SparqlClientFactory {
    fn client_for(&self, vocabulary: &VocabularyConfig) -> Arc<dyn GraphQueryClient> {
        Arc::new(SparqlClient::new(
            self.client.clone(),
            vocabulary,
            self.timeouts,
        ))
    }
}
