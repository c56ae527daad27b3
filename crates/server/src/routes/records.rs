use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use models::RecordCollection;
use service::errors::ServiceError;
use tracing::info;

use crate::errors::JsonApiError;
use crate::observability;
use crate::routes::AppState;

/// Return the stored document as-is.
pub async fn getter(State(state): State<AppState>) -> Result<impl IntoResponse, JsonApiError> {
    let _timer = observability::observe("get");
    let snapshot = state.records.snapshot().await?;
    info!(keys = snapshot.keys, "request GET data");
    Ok(([(header::CONTENT_TYPE, "application/json")], snapshot.bytes))
}

/// Merge the body into the stored document. The body is parsed as JSON
/// whatever its content type; browsers send it as `text/plain`.
pub async fn putter(State(state): State<AppState>, body: Bytes) -> Result<StatusCode, JsonApiError> {
    let _timer = observability::observe("put");
    let incoming = RecordCollection::from_slice(&body)
        .map_err(|e| ServiceError::Validation(e.to_string()))?;
    info!(keys = incoming.len(), "request PUT data");
    state.records.merge(incoming).await?;
    Ok(StatusCode::OK)
}

/// Delete one key; deleting an absent key still succeeds.
pub async fn purger(State(state): State<AppState>, Path(key): Path<String>) -> Result<StatusCode, JsonApiError> {
    let _timer = observability::observe("purge");
    info!(%key, "request POST deletion");
    let existed = state.records.purge(&key).await?;
    if !existed {
        info!(%key, "nothing to delete");
    }
    Ok(StatusCode::OK)
}
