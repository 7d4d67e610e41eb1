//! Literature list, download and delete handlers

use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
};
use litforge_common::db::models::Literature;
use litforge_common::errors::AppError;
use tracing::{info, instrument};

use crate::error::PageResult;
use crate::{views, AppState};

/// Every record with its details
pub async fn list(State(state): State<AppState>) -> PageResult<Html<String>> {
    let records = state.repo.list_literature().await?;
    Ok(views::literature_list(&records))
}

/// Serve the stored PDF of a record
#[instrument(skip(state))]
pub async fn download(State(state): State<AppState>, Path(id): Path<i64>) -> PageResult<Response> {
    let record = find(&state, id).await?;
    let file_name = record.file_name();

    let bytes = match tokio::fs::read(&record.file_path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound {
                resource_type: "file".to_string(),
                id: file_name,
            }
            .into());
        }
        Err(e) => return Err(AppError::from(e).into()),
    };

    let disposition = format!("attachment; filename=\"{}\"", file_name.replace('"', "_"));

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// Ask before deleting
pub async fn confirm_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> PageResult<Html<String>> {
    let record = find(&state, id).await?;
    Ok(views::delete_confirm(&record))
}

/// Delete a record, then return to the list
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> PageResult<Redirect> {
    let deleted = state
        .processor
        .delete(id)
        .await?
        .ok_or(AppError::LiteratureNotFound { id })?;

    info!(id, title = %deleted.title, "Literature deleted via web form");

    Ok(Redirect::to("/literature"))
}

async fn find(state: &AppState, id: i64) -> Result<Literature, AppError> {
    state
        .repo
        .find_literature_by_id(id)
        .await?
        .ok_or(AppError::LiteratureNotFound { id })
}
