//! Ingestion processor
//!
//! Core logic for turning an uploaded PDF into a literature record: store
//! the file, extract text and metadata, generate summary and outline, and
//! persist the result.

use crate::errors::IngestionError;
use crate::extractor::extract_metadata;
use crate::pdf::{PdfTextExtractor, TextExtractor};
use crate::storage::FileStorage;
use litforge_common::config::{AppConfig, FileRetention};
use litforge_common::db::models::Literature;
use litforge_common::db::{NewLiterature, Repository};
use litforge_common::metrics;
use litforge_common::summarizer::{GenerationKind, Summarizer};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Ingestion processor
pub struct IngestionProcessor {
    repository: Repository,
    storage: FileStorage,
    extractor: Arc<dyn TextExtractor>,
    summarizer: Arc<dyn Summarizer>,
    retention: FileRetention,
}

impl IngestionProcessor {
    pub fn new(
        repository: Repository,
        storage: FileStorage,
        summarizer: Arc<dyn Summarizer>,
        retention: FileRetention,
    ) -> Self {
        Self {
            repository,
            storage,
            extractor: Arc::new(PdfTextExtractor),
            summarizer,
            retention,
        }
    }

    /// Build a processor from the storage section of the configuration
    pub fn from_config(
        config: &AppConfig,
        repository: Repository,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self::new(
            repository,
            FileStorage::new(config.storage.data_dir.clone()),
            summarizer,
            config.storage.file_retention,
        )
    }

    /// Replace the text extractor
    pub fn with_extractor(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn storage(&self) -> &FileStorage {
        &self.storage
    }

    /// Ingest an uploaded document and persist its record
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn ingest(
        &self,
        bytes: &[u8],
        original_filename: &str,
    ) -> Result<Literature, IngestionError> {
        let start = Instant::now();

        let path = self.storage.save(bytes, original_filename).await?;
        info!(path = %path.display(), "Stored upload, extracting text");

        let text = self.extract_text(path.clone()).await?;
        let metadata = extract_metadata(&text);

        info!(
            title = %metadata.title,
            text_len = text.len(),
            "Metadata extracted, generating summary and outline"
        );

        let (summary, outline) = tokio::join!(
            self.summarizer.summarize(&text),
            self.summarizer.outline(&text)
        );

        if !summary.is_generated() {
            warn!("Summary generation failed, storing error text");
        }
        if !outline.is_generated() {
            warn!("Outline generation failed, storing error text");
        }

        let (summary, summary_status) = summary.into_content(GenerationKind::Summary);
        let (outline, outline_status) = outline.into_content(GenerationKind::Outline);

        let record = self
            .repository
            .create_literature(NewLiterature {
                title: metadata.title,
                authors: metadata.authors,
                publication_date: metadata.publication_date,
                location: metadata.location,
                abstract_text: metadata.abstract_text,
                summary,
                summary_status,
                outline,
                outline_status,
                file_path: path.display().to_string(),
            })
            .await?;

        let elapsed = start.elapsed().as_secs_f64();
        metrics::record_ingestion(elapsed);

        info!(
            id = record.id,
            title = %record.title,
            duration_secs = elapsed,
            "Literature ingested"
        );

        Ok(record)
    }

    /// Ingest a PDF that already sits on the local filesystem
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn ingest_path(&self, path: &Path) -> Result<Literature, IngestionError> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(IngestionError::FileNotFound(path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        self.ingest(&bytes, &filename).await
    }

    /// Delete a record and apply the file retention policy.
    ///
    /// Returns `None` when no record has this id.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<Option<Literature>, IngestionError> {
        let Some(record) = self.repository.delete_literature(id).await? else {
            info!("No literature with this id, nothing deleted");
            return Ok(None);
        };

        let file_removed = match self.retention {
            FileRetention::Retain => false,
            FileRetention::Cascade => self.storage.remove(Path::new(&record.file_path)).await?,
        };

        metrics::record_deletion(file_removed);

        info!(
            title = %record.title,
            file_removed,
            "Literature deleted"
        );

        Ok(Some(record))
    }

    async fn extract_text(&self, path: PathBuf) -> Result<String, IngestionError> {
        let extractor = Arc::clone(&self.extractor);
        let display = path.display().to_string();

        tokio::task::spawn_blocking(move || extractor.extract_text(&path))
            .await
            .map_err(|e| IngestionError::PdfParseError {
                path: display,
                message: format!("Extraction task failed: {}", e),
            })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{UNKNOWN_DATE, UNKNOWN_LOCATION};
    use crate::pdf::tests::pdf_with_pages;
    use async_trait::async_trait;
    use litforge_common::config::DatabaseConfig;
    use litforge_common::db::models::GenerationStatus;
    use litforge_common::db::{sqlite_url, DbPool};
    use litforge_common::summarizer::{Generation, MockSummarizer};
    use tempfile::TempDir;

    struct StubExtractor(&'static str);

    impl TextExtractor for StubExtractor {
        fn extract_text(&self, _path: &Path) -> Result<String, IngestionError> {
            Ok(self.0.to_string())
        }
    }

    /// Summaries succeed, outlines fail
    struct HalfBrokenSummarizer;

    #[async_trait]
    impl Summarizer for HalfBrokenSummarizer {
        async fn generate(&self, kind: GenerationKind, _text: &str) -> Generation {
            match kind {
                GenerationKind::Summary => Generation::Generated("A short summary.".to_string()),
                GenerationKind::Outline => Generation::Failed("API error 429: rate limited".to_string()),
            }
        }

        fn model_name(&self) -> &str {
            "half-broken"
        }
    }

    async fn processor_with(
        summarizer: Arc<dyn Summarizer>,
        retention: FileRetention,
    ) -> (TempDir, IngestionProcessor) {
        let dir = TempDir::new().unwrap();
        let config = DatabaseConfig {
            url: sqlite_url(&dir.path().join("test.db")),
            ..DatabaseConfig::default()
        };
        let pool = DbPool::new(&config).await.unwrap();
        let processor = IngestionProcessor::new(
            Repository::new(pool),
            FileStorage::new(dir.path().join("data")),
            summarizer,
            retention,
        );
        (dir, processor)
    }

    fn stored_files(processor: &IngestionProcessor) -> usize {
        std::fs::read_dir(processor.storage().root())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    #[tokio::test]
    async fn test_ingest_labeled_document() {
        let (_dir, processor) = processor_with(Arc::new(MockSummarizer), FileRetention::Retain).await;
        let processor = processor.with_extractor(Arc::new(StubExtractor(
            "Title: Quantum Foo\nAuthors: A. Bar\n\nAbstract: We study X.\n\nIntro...",
        )));

        let record = processor.ingest(b"%PDF-stub", "foo.pdf").await.unwrap();

        assert_eq!(record.title, "Quantum Foo");
        assert_eq!(record.authors, "A. Bar");
        assert_eq!(record.publication_date, UNKNOWN_DATE);
        assert_eq!(record.location, UNKNOWN_LOCATION);
        assert_eq!(record.abstract_text, "We study X.");
        assert_eq!(record.summary_status(), GenerationStatus::Generated);
        assert_eq!(record.outline_status(), GenerationStatus::Generated);
        assert!(record.file_path.ends_with("_foo.pdf"));
        assert!(Path::new(&record.file_path).exists());

        let listed = processor.repository().list_literature().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, record.id);
    }

    #[tokio::test]
    async fn test_generation_failures_are_recorded_independently() {
        let (_dir, processor) =
            processor_with(Arc::new(HalfBrokenSummarizer), FileRetention::Retain).await;
        let processor = processor.with_extractor(Arc::new(StubExtractor("Title: Foo\n")));

        let record = processor.ingest(b"%PDF-stub", "foo.pdf").await.unwrap();

        assert_eq!(record.summary, "A short summary.");
        assert_eq!(record.summary_status(), GenerationStatus::Generated);
        assert_eq!(record.outline, "Error generating outline: API error 429: rate limited");
        assert_eq!(record.outline_status(), GenerationStatus::Failed);
    }

    #[tokio::test]
    async fn test_empty_text_yields_sentinels() {
        let (_dir, processor) = processor_with(Arc::new(MockSummarizer), FileRetention::Retain).await;
        let processor = processor.with_extractor(Arc::new(StubExtractor("")));

        let record = processor.ingest(b"%PDF-stub", "blank.pdf").await.unwrap();

        assert_eq!(record.title, "Unknown Title");
        assert_eq!(record.authors, "Unknown Authors");
        assert_eq!(record.abstract_text, "");
    }

    #[tokio::test]
    async fn test_ingest_real_pdf() {
        let (_dir, processor) = processor_with(Arc::new(MockSummarizer), FileRetention::Retain).await;
        let bytes = pdf_with_pages(&[&["Title: Quantum Foo", "Authors: A. Bar"]]);

        let record = processor.ingest(&bytes, "quantum.pdf").await.unwrap();

        assert_eq!(record.title, "Quantum Foo");
        assert_eq!(record.authors, "A. Bar");
    }

    #[tokio::test]
    async fn test_unparseable_pdf_persists_nothing() {
        let (_dir, processor) = processor_with(Arc::new(MockSummarizer), FileRetention::Retain).await;

        let err = processor.ingest(b"not a pdf at all", "broken.pdf").await.unwrap_err();

        assert!(matches!(err, IngestionError::PdfParseError { .. }));
        assert!(processor.repository().list_literature().await.unwrap().is_empty());
        // The stored upload is left in place
        assert_eq!(stored_files(&processor), 1);
    }

    #[tokio::test]
    async fn test_ingest_missing_path() {
        let (dir, processor) = processor_with(Arc::new(MockSummarizer), FileRetention::Retain).await;

        let err = processor
            .ingest_path(&dir.path().join("nope.pdf"))
            .await
            .unwrap_err();

        assert!(matches!(err, IngestionError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_retains_file_by_default() {
        let (_dir, processor) = processor_with(Arc::new(MockSummarizer), FileRetention::Retain).await;
        let processor = processor.with_extractor(Arc::new(StubExtractor("Title: Keep\n")));
        let record = processor.ingest(b"%PDF-stub", "keep.pdf").await.unwrap();

        let deleted = processor.delete(record.id).await.unwrap().unwrap();

        assert_eq!(deleted.id, record.id);
        assert!(Path::new(&record.file_path).exists());
        assert!(processor.repository().find_literature_by_id(record.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_cascade_removes_file() {
        let (_dir, processor) = processor_with(Arc::new(MockSummarizer), FileRetention::Cascade).await;
        let processor = processor.with_extractor(Arc::new(StubExtractor("Title: Drop\n")));
        let record = processor.ingest(b"%PDF-stub", "drop.pdf").await.unwrap();

        processor.delete(record.id).await.unwrap().unwrap();

        assert!(!Path::new(&record.file_path).exists());
    }

    #[tokio::test]
    async fn test_delete_missing_id() {
        let (_dir, processor) = processor_with(Arc::new(MockSummarizer), FileRetention::Cascade).await;

        assert!(processor.delete(42).await.unwrap().is_none());
    }
}
