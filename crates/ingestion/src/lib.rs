//! LitForge ingestion
//!
//! Turns an uploaded PDF into a persisted literature record:
//! 1. Stores the file under the data directory
//! 2. Extracts the document text
//! 3. Pattern-matches bibliographic metadata
//! 4. Generates summary and outline concurrently
//! 5. Saves the record

pub mod errors;
pub mod extractor;
pub mod pdf;
pub mod processor;
pub mod storage;

pub use errors::IngestionError;
pub use extractor::{extract_metadata, ExtractedMetadata};
pub use pdf::{PdfTextExtractor, TextExtractor};
pub use processor::IngestionProcessor;
pub use storage::FileStorage;
