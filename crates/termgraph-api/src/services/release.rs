//! Vocabulary release labels.
//!
//! A statically configured `release` always wins. Otherwise, when lookup is
//! enabled, the name of the newest GitHub release of the vocabulary's
//! repository is used. Every failure degrades to the "no data" label.

use std::time::Duration;

use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;
use termgraph_core::defaults::{GITHUB_API_URL, RELEASE_TIMEOUT_SECS, VERSION_UNAVAILABLE};
use termgraph_core::{Error, Result, VocabularyConfig};
use tracing::{debug, instrument, warn};

#[derive(Debug, Deserialize)]
struct GithubRelease {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReleaseResolver {
    lookup: Option<GithubLookup>,
}

#[derive(Debug, Clone)]
struct GithubLookup {
    client: Client,
    api_url: String,
}

impl ReleaseResolver {
    /// Only static `release` settings are used.
    pub fn disabled() -> Self {
        Self { lookup: None }
    }

    /// Fall back to the GitHub releases API at `api_url`.
    pub fn github(api_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(RELEASE_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            lookup: Some(GithubLookup {
                client,
                api_url: api_url.into().trim_end_matches('/').to_string(),
            }),
        })
    }

    /// Resolver configured from `TERMGRAPH_RELEASE_LOOKUP` and `GITHUB_API_URL`.
    pub fn from_env() -> Result<Self> {
        let enabled = std::env::var("TERMGRAPH_RELEASE_LOOKUP")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);
        if !enabled {
            return Ok(Self::disabled());
        }
        let api_url =
            std::env::var("GITHUB_API_URL").unwrap_or_else(|_| GITHUB_API_URL.to_string());
        Self::github(api_url)
    }

    pub fn is_enabled(&self) -> bool {
        self.lookup.is_some()
    }

    /// Release label shown as the term record version.
    #[instrument(skip(self, vocabulary), fields(subsystem = "api", component = "release_resolver", op = "version_for", vocabulary = %vocabulary.name))]
    pub async fn version_for(&self, owner: &str, vocabulary: &VocabularyConfig) -> String {
        if let Some(release) = vocabulary.release.as_deref().filter(|r| !r.trim().is_empty()) {
            return release.trim().to_string();
        }

        let (Some(lookup), Some(slug)) = (&self.lookup, vocabulary.repo_slug.as_deref()) else {
            return VERSION_UNAVAILABLE.to_string();
        };

        match lookup.latest_release(owner, slug).await {
            Ok(Some(name)) => name,
            Ok(None) => {
                debug!(slug, "No named release published");
                VERSION_UNAVAILABLE.to_string()
            }
            Err(e) => {
                warn!(slug, error = %e, "Release lookup failed");
                VERSION_UNAVAILABLE.to_string()
            }
        }
    }
}

impl GithubLookup {
    async fn latest_release(&self, owner: &str, slug: &str) -> Result<Option<String>> {
        let response = self
            .client
            .get(format!(
                "{}/repos/{}/{}/releases?per_page=1",
                self.api_url, owner, slug
            ))
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, concat!("termgraph/", env!("CARGO_PKG_VERSION")))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Request(format!(
                "GitHub returned {} for {}/{}",
                response.status(),
                owner,
                slug
            )));
        }

        let releases: Vec<GithubRelease> = response.json().await?;
        Ok(releases
            .into_iter()
            .next()
            .and_then(|r| r.name)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty()))
    }
}
