//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::DocumentId,
    infrastructure::dto::http::{
        CreateDocumentRequest, DocumentDto, ErrorResponse, HealthResponse, UpdateDocumentRequest,
    },
    ui::state::AppState,
    usecase::{CreateDocumentError, GetDocumentError, UpdateDocumentError},
};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl ToString) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

fn parse_document_id(raw: String) -> Result<DocumentId, ApiError> {
    DocumentId::try_from(raw).map_err(|e| {
        tracing::warn!("{}", e);
        api_error(StatusCode::BAD_REQUEST, e)
    })
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// `PUT /api/documents/{document_id}`: write a full document
pub async fn create_document(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<String>,
    Json(request): Json<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<DocumentDto>), ApiError> {
    let document_id = parse_document_id(document_id)?;
    let (writes, mode) = request
        .into_domain()
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e))?;

    match state
        .usecases
        .create_document
        .execute(document_id, writes, mode)
        .await
    {
        Ok(document) => Ok((StatusCode::CREATED, Json(DocumentDto::from(&document)))),
        Err(e @ CreateDocumentError::AlreadyExists(_)) => {
            tracing::warn!("{}", e);
            Err(api_error(StatusCode::CONFLICT, e))
        }
        Err(e @ CreateDocumentError::Repository(_)) => {
            tracing::error!("{}", e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e))
        }
    }
}

/// `GET /api/documents/{document_id}`: point read
pub async fn get_document(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<String>,
) -> Result<Json<DocumentDto>, ApiError> {
    let document_id = parse_document_id(document_id)?;

    match state.usecases.get_document.execute(&document_id).await {
        Ok(document) => Ok(Json(DocumentDto::from(&document))),
        Err(e @ GetDocumentError::NotFound(_)) => Err(api_error(StatusCode::NOT_FOUND, e)),
    }
}

/// `PATCH /api/documents/{document_id}`: partial update by field path
pub async fn update_document(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<String>,
    Json(request): Json<UpdateDocumentRequest>,
) -> Result<Json<DocumentDto>, ApiError> {
    let document_id = parse_document_id(document_id)?;
    let writes = request
        .into_domain()
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e))?;

    match state
        .usecases
        .update_document
        .execute(&document_id, writes)
        .await
    {
        Ok(document) => Ok(Json(DocumentDto::from(&document))),
        Err(e @ UpdateDocumentError::NotFound(_)) => Err(api_error(StatusCode::NOT_FOUND, e)),
        Err(e @ UpdateDocumentError::EmptyUpdate) => Err(api_error(StatusCode::BAD_REQUEST, e)),
        Err(e @ UpdateDocumentError::Repository(_)) => {
            tracing::error!("{}", e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e))
        }
    }
}
