//! Literature entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// How the summary or outline text of a record was produced
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    Generated,
    Failed,
}

impl From<String> for GenerationStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "failed" => GenerationStatus::Failed,
            _ => GenerationStatus::Generated,
        }
    }
}

impl From<GenerationStatus> for String {
    fn from(status: GenerationStatus) -> Self {
        match status {
            GenerationStatus::Generated => "generated".to_string(),
            GenerationStatus::Failed => "failed".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "literature")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    #[sea_orm(column_type = "Text")]
    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub authors: String,

    #[sea_orm(column_type = "Text")]
    pub publication_date: String,

    #[sea_orm(column_type = "Text")]
    pub location: String,

    #[sea_orm(column_type = "Text")]
    #[serde(rename = "abstract")]
    pub abstract_text: String,

    #[sea_orm(column_type = "Text")]
    pub summary: String,

    #[sea_orm(column_type = "Text")]
    pub summary_status: String,

    #[sea_orm(column_type = "Text")]
    pub outline: String,

    #[sea_orm(column_type = "Text")]
    pub outline_status: String,

    #[sea_orm(column_type = "Text")]
    pub file_path: String,

    pub created_at: DateTimeUtc,
}

impl Model {
    /// Label shown when picking a record from a list
    pub fn display_label(&self) -> String {
        format!("{} by {}", self.title, self.authors)
    }

    pub fn summary_status(&self) -> GenerationStatus {
        GenerationStatus::from(self.summary_status.clone())
    }

    pub fn outline_status(&self) -> GenerationStatus {
        GenerationStatus::from(self.outline_status.clone())
    }

    /// File name of the stored PDF, without its directory
    pub fn file_name(&self) -> String {
        std::path::Path::new(&self.file_path)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.file_path.clone())
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
