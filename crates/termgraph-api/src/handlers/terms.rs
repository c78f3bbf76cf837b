use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use termgraph_core::{Error, TermPayload};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TermParams {
    pub vocabulary: Option<String>,
    pub term: Option<String>,
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, Error> {
    value
        .as_deref()
        .ok_or_else(|| Error::InvalidInput(format!("Missing required parameter: {}", name)))
}

/// Resolve one term: `GET /api/v1/terms?vocabulary=..&term=..`.
pub async fn get_term(
    State(state): State<AppState>,
    Query(params): Query<TermParams>,
) -> Result<Json<TermPayload>, ApiError> {
    let vocabulary = required(&params.vocabulary, "vocabulary")?;
    let term = required(&params.term, "term")?;
    let payload = state.resolver.resolve(vocabulary, term).await?;
    Ok(Json(payload))
}
