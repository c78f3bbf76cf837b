//! Vocabulary catalogue configuration.
//!
//! The catalogue lists every vocabulary the service can resolve: where its
//! repository lives, which credentials to use, and the query templates to
//! run against it. It is loaded from a TOML file:
//!
//! ```toml
//! languages = ["de", "fr", "it", "rm", "en"]
//!
//! [[vocabularies]]
//! name = "TectonicUnits"
//! url = "http://graphdb:7200"
//! repository_id = "tectonic"
//! username = "reader"
//! password = "${GRAPHDB_PASSWORD}"
//!
//! [vocabularies.queries]
//! term = "SELECT ?predicate ?object WHERE { ... ${term} ... }"
//! breadcrumbs = "SELECT ?narrowerConcept WHERE { ... ${term} ... }"
//! all_labels = "SELECT ?subject ?label WHERE { ... }"
//! ```
//!
//! `${UPPER_CASE}` references are replaced from the environment at load time.
//! Lowercase placeholders such as `${term}` are left for the query renderer.

use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::defaults;
use crate::error::{Error, Result};
use crate::traits::CatalogueStore;

static ENV_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env pattern is valid"));

fn default_languages() -> Vec<String> {
    defaults::LANGUAGES.iter().map(|l| l.to_string()).collect()
}

/// Query templates for one vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryTemplates {
    /// `?predicate ?object` rows describing the term.
    #[serde(default)]
    pub term: Option<String>,
    /// `?narrowerConcept` rows forming the ancestor chain.
    #[serde(default)]
    pub breadcrumbs: Option<String>,
    /// `?subject ?label` rows for every concept in the repository.
    #[serde(default)]
    pub all_labels: Option<String>,
}

/// Connection parameters and templates for one vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyConfig {
    pub name: String,
    /// Base URL of the graph store server.
    pub url: String,
    pub repository_id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    /// Static release label shown as the record version.
    #[serde(default)]
    pub release: Option<String>,
    /// GitHub repository slug holding the vocabulary releases.
    #[serde(default)]
    pub repo_slug: Option<String>,
    #[serde(default)]
    pub queries: QueryTemplates,
}

impl VocabularyConfig {
    /// SPARQL endpoint of the vocabulary's repository.
    pub fn repository_url(&self) -> String {
        format!(
            "{}/repositories/{}",
            self.url.trim_end_matches('/'),
            self.repository_id
        )
    }

    /// Base URL of the server, without a trailing slash.
    pub fn server_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::Config("vocabulary name cannot be empty".to_string()));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(Error::Config(format!(
                "vocabulary {}: url must start with http:// or https://, got: {}",
                self.name, self.url
            )));
        }
        if self.repository_id.is_empty() {
            return Err(Error::Config(format!(
                "vocabulary {}: repository_id cannot be empty",
                self.name
            )));
        }
        Ok(())
    }
}

/// The full set of configured vocabularies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalogue {
    /// Language display order for preferred labels.
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    /// Owner of the GitHub release repositories.
    #[serde(default)]
    pub github_owner: Option<String>,
    /// Vocabularies in configured order.
    #[serde(default)]
    pub vocabularies: Vec<VocabularyConfig>,
}

impl Default for Catalogue {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            github_owner: None,
            vocabularies: Vec::new(),
        }
    }
}

impl Catalogue {
    /// Load and validate a catalogue from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a catalogue from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let content = substitute_env_vars(content);
        let catalogue: Catalogue = toml::from_str(&content)?;
        catalogue.validate()?;
        Ok(catalogue)
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for vocabulary in &self.vocabularies {
            vocabulary.validate()?;
            if !seen.insert(vocabulary.name.as_str()) {
                return Err(Error::Config(format!(
                    "vocabulary {} is configured twice",
                    vocabulary.name
                )));
            }
        }
        Ok(())
    }

    /// Look up a vocabulary by name.
    pub fn vocabulary(&self, name: &str) -> Result<&VocabularyConfig> {
        self.vocabularies
            .iter()
            .find(|v| v.name == name)
            .ok_or_else(|| {
                Error::ConfigMissing(format!("Configuration not found for vocabulary: {}", name))
            })
    }

    /// Vocabulary names in configured order.
    pub fn names(&self) -> Vec<&str> {
        self.vocabularies.iter().map(|v| v.name.as_str()).collect()
    }

    pub fn github_owner(&self) -> &str {
        self.github_owner
            .as_deref()
            .unwrap_or(defaults::GITHUB_OWNER)
    }
}

/// Replace `${UPPER_CASE}` references with environment values.
///
/// Unset variables are left as written.
fn substitute_env_vars(content: &str) -> String {
    ENV_REFERENCE
        .replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
}

// =============================================================================
// CATALOGUE STORES
// =============================================================================

/// Reads the catalogue file on every request, so edits apply without restart.
#[derive(Debug, Clone)]
pub struct FileCatalogueStore {
    path: PathBuf,
}

impl FileCatalogueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogueStore for FileCatalogueStore {
    async fn load(&self) -> Result<Arc<Catalogue>> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            Error::Config(format!("cannot read {}: {}", self.path.display(), e))
        })?;
        let catalogue = Catalogue::from_toml_str(&content)?;
        debug!(
            path = %self.path.display(),
            vocabularies = catalogue.vocabularies.len(),
            "Catalogue loaded"
        );
        Ok(Arc::new(catalogue))
    }
}

/// Fixed in-memory catalogue.
#[derive(Debug, Clone)]
pub struct StaticCatalogueStore {
    catalogue: Arc<Catalogue>,
}

impl StaticCatalogueStore {
    pub fn new(catalogue: Catalogue) -> Self {
        Self {
            catalogue: Arc::new(catalogue),
        }
    }
}

#[async_trait]
impl CatalogueStore for StaticCatalogueStore {
    async fn load(&self) -> Result<Arc<Catalogue>> {
        Ok(self.catalogue.clone())
    }
}
