//! JSON read API

use axum::{
    extract::{Path, State},
    Json,
};
use litforge_common::db::models::Literature;
use litforge_common::errors::AppError;

use crate::error::ApiResult;
use crate::AppState;

/// All records in insertion order
pub async fn list_literature(State(state): State<AppState>) -> ApiResult<Json<Vec<Literature>>> {
    let records = state.repo.list_literature().await?;
    Ok(Json(records))
}

/// One record by id
pub async fn get_literature(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Literature>> {
    let record = state
        .repo
        .find_literature_by_id(id)
        .await?
        .ok_or(AppError::LiteratureNotFound { id })?;

    Ok(Json(record))
}
