//! Ingestion error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("PDF parse error for {path}: {message}")]
    PdfParseError { path: String, message: String },

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<litforge_common::errors::AppError> for IngestionError {
    fn from(e: litforge_common::errors::AppError) -> Self {
        IngestionError::DatabaseError(e.to_string())
    }
}

impl From<IngestionError> for litforge_common::errors::AppError {
    fn from(e: IngestionError) -> Self {
        use litforge_common::errors::AppError;

        match e {
            IngestionError::PdfParseError { message, .. } => AppError::InvalidFormat { message },
            IngestionError::FileNotFound(path) => AppError::NotFound {
                resource_type: "file".to_string(),
                id: path,
            },
            IngestionError::DatabaseError(message) => AppError::Internal { message },
            IngestionError::StorageError(message) => AppError::Storage { message },
            IngestionError::IoError(e) => AppError::Storage {
                message: e.to_string(),
            },
        }
    }
}
