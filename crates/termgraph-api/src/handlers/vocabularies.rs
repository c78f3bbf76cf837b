use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use termgraph_core::{sanitize, Error};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyList {
    pub vocabularies: Vec<String>,
    pub languages: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryInfo {
    pub owner: String,
    pub repo_slug: String,
    pub releases_html_url: String,
}

/// Configured vocabulary names in catalogue order.
pub async fn list_vocabularies(
    State(state): State<AppState>,
) -> Result<Json<VocabularyList>, ApiError> {
    let catalogue = state.catalogue.load().await?;
    Ok(Json(VocabularyList {
        vocabularies: catalogue.names().into_iter().map(String::from).collect(),
        languages: catalogue.languages.clone(),
    }))
}

/// GitHub repository holding a vocabulary's releases.
pub async fn get_repository_info(
    State(state): State<AppState>,
    Path(vocabulary): Path<String>,
) -> Result<Json<RepositoryInfo>, ApiError> {
    let name = sanitize::validate_vocabulary_name(&vocabulary)?;
    let catalogue = state.catalogue.load().await?;
    let config = catalogue.vocabulary(name)?;

    let slug = config.repo_slug.as_deref().ok_or_else(|| {
        Error::Internal(format!("No repository configured for vocabulary: {}", name))
    })?;
    let owner = catalogue.github_owner();

    Ok(Json(RepositoryInfo {
        owner: owner.to_string(),
        repo_slug: slug.to_string(),
        releases_html_url: format!("https://github.com/{}/{}/releases", owner, slug),
    }))
}
