//! LitForge Common Library
//!
//! Shared code for the LitForge binaries including:
//! - Literature record model and repository
//! - Summarization client abstraction
//! - Error types and handling
//! - Configuration management
//! - Metrics helpers

pub mod config;
pub mod db;
pub mod errors;
pub mod metrics;
pub mod summarizer;

// Re-export commonly used types
pub use config::AppConfig;
pub use db::{DbPool, Repository};
pub use errors::{AppError, Result};
pub use summarizer::{Generation, Summarizer};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default chat-completion model used for summaries and outlines
pub const DEFAULT_SUMMARY_MODEL: &str = "gpt-4o-mini";
