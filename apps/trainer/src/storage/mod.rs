//! Persistence gateway.
//!
//! The trainer reads and writes whole collections through one async
//! contract; implementations decide where the bytes live. [`FileStore`] is
//! the on-disk store, [`MemoryStore`] backs tests.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use kana_core::{DailySummary, ReviewCard, ReviewLogEntry, Settings};
use thiserror::Error;

/// Storage failures surfaced to the caller.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Key-value persistence contract for the trainer's collections.
///
/// Missing data reads as empty collections and default settings; the store
/// never invents errors for a first launch. Writes replace the whole
/// collection except [`append_review`](StorageGateway::append_review) and
/// [`upsert_session`](StorageGateway::upsert_session), which target one
/// record. The wholesale `save_reviews`/`save_sessions` setters exist for
/// backup import, which rewrites merged collections.
#[async_trait]
pub trait StorageGateway: Send + Sync {
    async fn get_cards(&self) -> Result<Vec<ReviewCard>>;
    async fn save_cards(&self, cards: &[ReviewCard]) -> Result<()>;

    /// Stored settings, or documented defaults when absent or unreadable.
    async fn get_settings(&self) -> Result<Settings>;
    async fn save_settings(&self, settings: &Settings) -> Result<()>;

    async fn get_reviews(&self) -> Result<Vec<ReviewLogEntry>>;
    async fn append_review(&self, entry: &ReviewLogEntry) -> Result<()>;
    async fn save_reviews(&self, reviews: &[ReviewLogEntry]) -> Result<()>;

    /// Daily aggregates ordered by date.
    async fn get_sessions(&self) -> Result<Vec<DailySummary>>;
    async fn upsert_session(&self, summary: &DailySummary) -> Result<()>;
    async fn save_sessions(&self, sessions: &[DailySummary]) -> Result<()>;

    /// Full data reset.
    async fn clear_all(&self) -> Result<()>;
}
