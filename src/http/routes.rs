use crate::application::answer::{Answer, QueryOutcome};
use crate::application::health::Health;
use crate::http::error::ApiError;
use crate::LegalEase;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const NO_DOCUMENTS: &str = "No documents indexed yet. Upload a file first.";

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub messages: Vec<String>,
    #[serde(default)]
    pub top_k: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum QueryResponse {
    Empty { error: &'static str },
    Answered(Answer),
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub status: &'static str,
    pub chunks_added: usize,
    pub index_size: usize,
    pub persisted: bool,
}

pub async fn health(State(app): State<Arc<LegalEase>>) -> Json<Health> {
    Json(app.health().await)
}

/// `multipart/form-data` with the document in a `file` field.
pub async fn upload(
    State(app): State<Arc<LegalEase>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?
    {
        if field.name() != Some("file") && field.file_name().is_none() {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(e.to_string()))?;

        let result = app.ingest_document(&file_name, bytes.to_vec()).await?;
        return Ok(Json(UploadResponse {
            status: "success",
            chunks_added: result.chunks_added,
            index_size: result.index_size,
            persisted: result.persisted,
        }));
    }
    Err(ApiError::bad_request("Missing file field"))
}

pub async fn query(
    State(app): State<Arc<LegalEase>>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    match app.ask(req.messages, req.top_k).await? {
        QueryOutcome::NoDocuments => Ok(Json(QueryResponse::Empty {
            error: NO_DOCUMENTS,
        })),
        QueryOutcome::Answered(answer) => Ok(Json(QueryResponse::Answered(answer))),
    }
}
