//! SQLite schema definition

/// SQL schema for the literature database.
///
/// AUTOINCREMENT keeps identifiers from being handed out again after the
/// highest row is deleted.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS literature (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    authors TEXT NOT NULL,
    publication_date TEXT NOT NULL DEFAULT '',
    location TEXT NOT NULL DEFAULT '',
    abstract_text TEXT NOT NULL DEFAULT '',
    summary TEXT NOT NULL DEFAULT '',
    summary_status TEXT NOT NULL DEFAULT 'generated',
    outline TEXT NOT NULL DEFAULT '',
    outline_status TEXT NOT NULL DEFAULT 'generated',
    file_path TEXT NOT NULL,
    created_at TEXT NOT NULL
);
"#;
