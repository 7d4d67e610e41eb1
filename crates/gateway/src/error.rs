//! Error responses
//!
//! Form pages render failures as HTML; the JSON API renders the shared
//! [`ErrorResponse`](litforge_common::errors::ErrorResponse) body.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use litforge_common::errors::AppError;
use litforge_ingestion::IngestionError;

use crate::views;

/// Error rendered as an HTML page
#[derive(Debug)]
pub struct PageError(pub AppError);

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        self.0.log();

        (status, views::error_page(status.as_u16(), &self.0.to_string())).into_response()
    }
}

impl From<AppError> for PageError {
    fn from(e: AppError) -> Self {
        PageError(e)
    }
}

impl From<IngestionError> for PageError {
    fn from(e: IngestionError) -> Self {
        PageError(e.into())
    }
}

/// Error rendered as JSON
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        self.0.log();

        (status, Json(self.0.to_response_body())).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        ApiError(e)
    }
}

pub type PageResult<T> = std::result::Result<T, PageError>;
pub type ApiResult<T> = std::result::Result<T, ApiError>;
