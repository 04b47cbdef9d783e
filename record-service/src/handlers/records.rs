use crate::dtos::{content_range, RecordResponse};
use crate::models::parse_record_id;
use crate::services::LIST_LIMIT;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use metrics::counter;
use service_core::error::AppError;

pub async fn list_records(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let records: Vec<RecordResponse> = state
        .store
        .list(LIST_LIMIT)
        .await?
        .into_iter()
        .map(RecordResponse::from)
        .collect();

    tracing::debug!(count = records.len(), "Listed records");

    Ok((
        [(header::CONTENT_RANGE, content_range(records.len()))],
        Json(records),
    ))
}

pub async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let object_id = parse_record_id(&id).map_err(|e| {
        tracing::warn!(id = %id, "Rejected malformed record identifier");
        counter!("record_lookups_total", "outcome" => "invalid").increment(1);
        e
    })?;

    match state.store.find_by_id(&object_id).await? {
        Some(stored) => {
            counter!("record_lookups_total", "outcome" => "found").increment(1);
            Ok((
                [(header::CONTENT_RANGE, content_range(stored.field_count))],
                Json(RecordResponse::from(stored.record)),
            ))
        }
        None => {
            tracing::info!(id = %id, "Record not found");
            counter!("record_lookups_total", "outcome" => "missing").increment(1);
            Err(AppError::NotFound(anyhow::anyhow!("config {} not found", id)))
        }
    }
}
