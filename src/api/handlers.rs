use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    Json as RequestJson,
};
use serde::Serialize;
use std::sync::Arc;

use crate::logic::{RecordError, RecordOperations};
use crate::model::{Record, RecordId};
use crate::store::traits::CollectionStore;

pub type AppState<S> = Arc<S>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

fn error_response(err: RecordError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        RecordError::NotFound => StatusCode::NOT_FOUND,
        RecordError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorResponse::new(&err.to_string())))
}

pub async fn list_records<R, S>(
    State(store): State<AppState<S>>,
) -> Result<Json<Vec<R>>, (StatusCode, Json<ErrorResponse>)>
where
    R: Record,
    S: CollectionStore<R>,
{
    match RecordOperations::list(store.as_ref()).await {
        Ok(records) => Ok(Json(records)),
        Err(err) => Err(error_response(err)),
    }
}

pub async fn get_record<R, S>(
    State(store): State<AppState<S>>,
    Path(id): Path<RecordId>,
) -> Result<Json<R>, (StatusCode, Json<ErrorResponse>)>
where
    R: Record,
    S: CollectionStore<R>,
{
    match RecordOperations::get(store.as_ref(), id).await {
        Ok(record) => Ok(Json(record)),
        Err(err) => Err(error_response(err)),
    }
}

/// Equality predicates arrive as query parameters; whatever is present is
/// combined, whatever is absent or blank is ignored.
pub async fn find_records<R, S>(
    State(store): State<AppState<S>>,
    Query(filter): Query<R::Filter>,
) -> Result<Json<Vec<R>>, (StatusCode, Json<ErrorResponse>)>
where
    R: Record,
    S: CollectionStore<R>,
{
    match RecordOperations::find(store.as_ref(), filter).await {
        Ok(records) => Ok(Json(records)),
        Err(err) => Err(error_response(err)),
    }
}

pub async fn create_record<R, S>(
    State(store): State<AppState<S>>,
    RequestJson(candidate): RequestJson<R>,
) -> Result<(StatusCode, Json<R>), (StatusCode, Json<ErrorResponse>)>
where
    R: Record,
    S: CollectionStore<R>,
{
    match RecordOperations::create(store.as_ref(), candidate).await {
        Ok(created) => Ok((StatusCode::CREATED, Json(created))),
        Err(err) => Err(error_response(err)),
    }
}

pub async fn update_record<R, S>(
    State(store): State<AppState<S>>,
    Path(id): Path<RecordId>,
    RequestJson(candidate): RequestJson<R>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)>
where
    R: Record,
    S: CollectionStore<R>,
{
    match RecordOperations::update(store.as_ref(), id, candidate).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(err) => Err(error_response(err)),
    }
}

pub async fn delete_record<R, S>(
    State(store): State<AppState<S>>,
    Path(id): Path<RecordId>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)>
where
    R: Record,
    S: CollectionStore<R>,
{
    match RecordOperations::delete::<R, S>(store.as_ref(), id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(err) => Err(error_response(err)),
    }
}
