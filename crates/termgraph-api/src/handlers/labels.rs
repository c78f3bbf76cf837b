use axum::extract::State;
use axum::Json;
use termgraph_core::LabelMapPayload;

use crate::error::ApiError;
use crate::state::AppState;

/// Label index across every configured vocabulary.
///
/// Best-effort like the index embedded in term responses: vocabularies that
/// fail to answer are left out, the request still succeeds.
pub async fn get_concept_labels(
    State(state): State<AppState>,
) -> Result<Json<LabelMapPayload>, ApiError> {
    let catalogue = state.catalogue.load().await?;
    let aggregated = state.labels.aggregate(&catalogue).await;
    Ok(Json(LabelMapPayload {
        all_concept_map: aggregated.index.into_entries(),
    }))
}
