//! PDF upload handlers

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::Html,
};
use litforge_common::errors::AppError;
use tracing::{info, instrument};

use crate::error::PageResult;
use crate::{views, AppState};

const FILE_FIELD: &str = "file";

/// A file received from the upload form
#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Render the upload form
pub async fn upload_form() -> Html<String> {
    views::upload_form()
}

/// Receive a PDF, run ingestion and report the new record
#[instrument(skip(state, multipart))]
pub async fn upload(State(state): State<AppState>, multipart: Multipart) -> PageResult<Html<String>> {
    let file = parse_upload(multipart, state.config.server.max_upload_bytes).await?;

    info!(filename = %file.filename, size = file.data.len(), "Received upload");

    let record = state.processor.ingest(&file.data, &file.filename).await?;

    Ok(views::upload_success(&record))
}

/// Pull the `file` field out of a multipart form
pub async fn parse_upload(mut multipart: Multipart, limit: usize) -> Result<UploadedFile, AppError> {
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some(FILE_FIELD) {
            // Ignore unknown fields
            let _ = field.bytes().await;
            continue;
        }

        let filename = field.file_name().unwrap_or("upload.pdf").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, limit))?
            .to_vec();

        file = Some(UploadedFile { filename, data });
    }

    let file = file.ok_or_else(|| AppError::Validation {
        message: "No file uploaded".to_string(),
        field: Some(FILE_FIELD.to_string()),
    })?;

    if file.data.is_empty() {
        return Err(AppError::Validation {
            message: "Uploaded file is empty".to_string(),
            field: Some(FILE_FIELD.to_string()),
        });
    }

    if !file.filename.to_lowercase().ends_with(".pdf") {
        return Err(AppError::Validation {
            message: format!("Only PDF files are accepted, got '{}'", file.filename),
            field: Some(FILE_FIELD.to_string()),
        });
    }

    Ok(file)
}

fn multipart_error(e: MultipartError, limit: usize) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { limit }
    } else {
        AppError::Validation {
            message: format!("Failed to read upload: {}", e.body_text()),
            field: Some(FILE_FIELD.to_string()),
        }
    }
}
