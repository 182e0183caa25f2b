//! File handlers. Upload takes the first `file` part of a multipart body.

use std::sync::Arc;

use axum::Extension;
use axum::extract::{Multipart, Path, Query, State};
use axum::response::Response;
use uuid::Uuid;

use propdesk_auth::AuthUser;
use propdesk_http::{ApiEnvelope, ApiError, ListEnvelope};

use super::dto::{FileRecordDto, ListFilesQuery};
use crate::domain::repo::FileRepository;
use crate::domain::service::FileService;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

pub async fn upload_file<R: FileRepository>(
    State(svc): State<Arc<FileService<R>>>,
    Extension(user): Extension<AuthUser>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::invalid_input(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field
            .file_name()
            .map(ToOwned::to_owned)
            .ok_or_else(|| ApiError::invalid_input("file part must carry a filename"))?;
        let content_type = field
            .content_type()
            .map_or_else(|| DEFAULT_CONTENT_TYPE.to_owned(), ToOwned::to_owned);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::invalid_input(e.to_string()))?;

        let record = svc.upload(&user, &file_name, &content_type, bytes).await?;
        return Ok(ApiEnvelope::created(
            FileRecordDto::from(record),
            "file uploaded",
        ));
    }
    Err(ApiError::invalid_input("multipart body has no 'file' part"))
}

pub async fn list_files<R: FileRepository>(
    State(svc): State<Arc<FileService<R>>>,
    Query(query): Query<ListFilesQuery>,
) -> Result<ListEnvelope<FileRecordDto>, ApiError> {
    let page = svc.list(query.into_query()).await?;
    Ok(ListEnvelope::ok(page.map(FileRecordDto::from), "files fetched"))
}

pub async fn get_file<R: FileRepository>(
    State(svc): State<Arc<FileService<R>>>,
    Path(id): Path<Uuid>,
) -> Result<ApiEnvelope<FileRecordDto>, ApiError> {
    let record = svc.get(id).await?;
    Ok(ApiEnvelope::ok(FileRecordDto::from(record), "file fetched"))
}

pub async fn delete_file<R: FileRepository>(
    State(svc): State<Arc<FileService<R>>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<ApiEnvelope<()>, ApiError> {
    svc.delete(&user, id).await?;
    Ok(ApiEnvelope::message("file deleted"))
}
