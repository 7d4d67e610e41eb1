//! Repository pattern for database operations
//!
//! Every operation that targets a single record resolves it by id at call
//! time; nothing here works from a previously fetched list.

use crate::db::models::*;
use crate::db::DbPool;
use crate::errors::Result;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

/// Fields for a record about to be created by ingestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLiterature {
    pub title: String,
    pub authors: String,
    pub publication_date: String,
    pub location: String,
    pub abstract_text: String,
    pub summary: String,
    pub summary_status: GenerationStatus,
    pub outline: String,
    pub outline_status: GenerationStatus,
    pub file_path: String,
}

/// Replacement values for every editable field of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteratureEdit {
    pub title: String,
    pub authors: String,
    pub publication_date: String,
    pub location: String,
    pub abstract_text: String,
    pub summary: String,
    pub outline: String,
}

impl From<&Literature> for LiteratureEdit {
    fn from(record: &Literature) -> Self {
        Self {
            title: record.title.clone(),
            authors: record.authors.clone(),
            publication_date: record.publication_date.clone(),
            location: record.location.clone(),
            abstract_text: record.abstract_text.clone(),
            summary: record.summary.clone(),
            outline: record.outline.clone(),
        }
    }
}

/// Repository for data access operations
#[derive(Clone)]
pub struct Repository {
    pool: DbPool,
}

impl Repository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> &DatabaseConnection {
        self.pool.conn()
    }

    /// Ping the database
    pub async fn ping(&self) -> Result<()> {
        self.pool.ping().await
    }

    // ========================================================================
    // Literature Operations
    // ========================================================================

    /// Persist a new record; the database assigns its id
    pub async fn create_literature(&self, new: NewLiterature) -> Result<Literature> {
        let record = LiteratureActiveModel {
            id: NotSet,
            title: Set(new.title),
            authors: Set(new.authors),
            publication_date: Set(new.publication_date),
            location: Set(new.location),
            abstract_text: Set(new.abstract_text),
            summary: Set(new.summary),
            summary_status: Set(new.summary_status.into()),
            outline: Set(new.outline),
            outline_status: Set(new.outline_status.into()),
            file_path: Set(new.file_path),
            created_at: Set(chrono::Utc::now()),
        };

        record.insert(self.conn()).await.map_err(Into::into)
    }

    /// All records in insertion order
    pub async fn list_literature(&self) -> Result<Vec<Literature>> {
        LiteratureEntity::find()
            .order_by_asc(LiteratureColumn::Id)
            .all(self.conn())
            .await
            .map_err(Into::into)
    }

    /// Find a record by id
    pub async fn find_literature_by_id(&self, id: i64) -> Result<Option<Literature>> {
        LiteratureEntity::find_by_id(id)
            .one(self.conn())
            .await
            .map_err(Into::into)
    }

    /// Replace every editable field of a record.
    ///
    /// Returns `None` when the id no longer exists. `id`, `file_path` and
    /// `created_at` are never touched.
    pub async fn update_literature(
        &self,
        id: i64,
        edit: LiteratureEdit,
    ) -> Result<Option<Literature>> {
        let Some(existing) = self.find_literature_by_id(id).await? else {
            return Ok(None);
        };

        let mut record = existing.into_active_model();
        record.title = Set(edit.title);
        record.authors = Set(edit.authors);
        record.publication_date = Set(edit.publication_date);
        record.location = Set(edit.location);
        record.abstract_text = Set(edit.abstract_text);
        record.summary = Set(edit.summary);
        record.outline = Set(edit.outline);

        let updated = record.update(self.conn()).await?;
        Ok(Some(updated))
    }

    /// Delete a record by id, returning the removed row
    pub async fn delete_literature(&self, id: i64) -> Result<Option<Literature>> {
        let Some(existing) = self.find_literature_by_id(id).await? else {
            return Ok(None);
        };

        let result = LiteratureEntity::delete_by_id(id)
            .exec(self.conn())
            .await?;

        Ok((result.rows_affected > 0).then_some(existing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::db::sqlite_url;
    use tempfile::TempDir;

    async fn test_repo() -> (TempDir, Repository) {
        let dir = TempDir::new().unwrap();
        let config = DatabaseConfig {
            url: sqlite_url(&dir.path().join("test.db")),
            ..DatabaseConfig::default()
        };
        let pool = DbPool::new(&config).await.unwrap();
        (dir, Repository::new(pool))
    }

    fn sample(title: &str) -> NewLiterature {
        NewLiterature {
            title: title.to_string(),
            authors: "A. Bar".to_string(),
            publication_date: "2021".to_string(),
            location: "Geneva".to_string(),
            abstract_text: "We study X.".to_string(),
            summary: "A summary.".to_string(),
            summary_status: GenerationStatus::Generated,
            outline: "Error generating outline: timeout".to_string(),
            outline_status: GenerationStatus::Failed,
            file_path: "data/abc_paper.pdf".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_list_roundtrip() {
        let (_dir, repo) = test_repo().await;

        let created = repo.create_literature(sample("Quantum Foo")).await.unwrap();
        let all = repo.list_literature().await.unwrap();

        assert_eq!(all.len(), 1);
        let stored = &all[0];
        assert_eq!(stored.id, created.id);
        assert_eq!(stored.title, "Quantum Foo");
        assert_eq!(stored.authors, "A. Bar");
        assert_eq!(stored.publication_date, "2021");
        assert_eq!(stored.location, "Geneva");
        assert_eq!(stored.abstract_text, "We study X.");
        assert_eq!(stored.summary, "A summary.");
        assert_eq!(stored.summary_status(), GenerationStatus::Generated);
        assert_eq!(stored.outline, "Error generating outline: timeout");
        assert_eq!(stored.outline_status(), GenerationStatus::Failed);
        assert_eq!(stored.file_path, "data/abc_paper.pdf");
    }

    #[tokio::test]
    async fn test_list_is_in_insertion_order() {
        let (_dir, repo) = test_repo().await;

        let first = repo.create_literature(sample("First")).await.unwrap();
        let second = repo.create_literature(sample("Second")).await.unwrap();
        assert!(second.id > first.id);

        let titles: Vec<_> = repo
            .list_literature()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[tokio::test]
    async fn test_unchanged_edit_is_idempotent() {
        let (_dir, repo) = test_repo().await;
        let created = repo.create_literature(sample("Quantum Foo")).await.unwrap();

        let updated = repo
            .update_literature(created.id, LiteratureEdit::from(&created))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated, created);
    }

    #[tokio::test]
    async fn test_edit_replaces_fields_but_not_file_path() {
        let (_dir, repo) = test_repo().await;
        let created = repo.create_literature(sample("Quantum Foo")).await.unwrap();

        let edit = LiteratureEdit {
            title: "Renamed".into(),
            authors: "C. Baz".into(),
            publication_date: "".into(),
            location: "".into(),
            abstract_text: "".into(),
            summary: "Rewritten".into(),
            outline: "1. Intro".into(),
        };
        repo.update_literature(created.id, edit).await.unwrap();

        let stored = repo.find_literature_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Renamed");
        assert_eq!(stored.authors, "C. Baz");
        assert_eq!(stored.publication_date, "");
        assert_eq!(stored.summary, "Rewritten");
        assert_eq!(stored.file_path, created.file_path);
        assert_eq!(stored.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_edit_missing_id_is_noop() {
        let (_dir, repo) = test_repo().await;
        let created = repo.create_literature(sample("Quantum Foo")).await.unwrap();

        let result = repo
            .update_literature(created.id + 100, LiteratureEdit::from(&created))
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(repo.list_literature().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_removes_row_and_ids_are_not_reused() {
        let (_dir, repo) = test_repo().await;
        let first = repo.create_literature(sample("First")).await.unwrap();
        let second = repo.create_literature(sample("Second")).await.unwrap();

        let deleted = repo.delete_literature(second.id).await.unwrap().unwrap();
        assert_eq!(deleted.title, "Second");

        let remaining = repo.list_literature().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, first.id);

        let third = repo.create_literature(sample("Third")).await.unwrap();
        assert!(third.id > second.id);
    }

    #[tokio::test]
    async fn test_delete_missing_id_returns_none() {
        let (_dir, repo) = test_repo().await;
        assert!(repo.delete_literature(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ping() {
        let (_dir, repo) = test_repo().await;
        repo.ping().await.unwrap();
    }
}
