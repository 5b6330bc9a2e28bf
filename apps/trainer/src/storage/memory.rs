//! In-memory store for tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use kana_core::{DailySummary, ReviewCard, ReviewLogEntry, Settings};

use super::{Result, StorageError, StorageGateway};

/// Mutex-guarded in-memory store.
///
/// Writes can be toggled to fail so callers can exercise the
/// persistence-failure path without touching a filesystem.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    fail_writes: AtomicBool,
}

#[derive(Default)]
struct Inner {
    cards: Vec<ReviewCard>,
    reviews: Vec<ReviewLogEntry>,
    sessions: Vec<DailySummary>,
    settings: Option<Settings>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("writes disabled".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl StorageGateway for MemoryStore {
    async fn get_cards(&self) -> Result<Vec<ReviewCard>> {
        Ok(self.inner.lock().expect("store lock").cards.clone())
    }

    async fn save_cards(&self, cards: &[ReviewCard]) -> Result<()> {
        self.check_writable()?;
        self.inner.lock().expect("store lock").cards = cards.to_vec();
        Ok(())
    }

    async fn get_settings(&self) -> Result<Settings> {
        Ok(self
            .inner
            .lock()
            .expect("store lock")
            .settings
            .clone()
            .unwrap_or_default())
    }

    async fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.check_writable()?;
        self.inner.lock().expect("store lock").settings = Some(settings.clone());
        Ok(())
    }

    async fn get_reviews(&self) -> Result<Vec<ReviewLogEntry>> {
        Ok(self.inner.lock().expect("store lock").reviews.clone())
    }

    async fn append_review(&self, entry: &ReviewLogEntry) -> Result<()> {
        self.check_writable()?;
        self.inner
            .lock()
            .expect("store lock")
            .reviews
            .push(entry.clone());
        Ok(())
    }

    async fn save_reviews(&self, reviews: &[ReviewLogEntry]) -> Result<()> {
        self.check_writable()?;
        self.inner.lock().expect("store lock").reviews = reviews.to_vec();
        Ok(())
    }

    async fn get_sessions(&self) -> Result<Vec<DailySummary>> {
        let mut sessions = self.inner.lock().expect("store lock").sessions.clone();
        sessions.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(sessions)
    }

    async fn upsert_session(&self, summary: &DailySummary) -> Result<()> {
        self.check_writable()?;
        let mut inner = self.inner.lock().expect("store lock");
        match inner.sessions.iter_mut().find(|s| s.date == summary.date) {
            Some(slot) => *slot = summary.clone(),
            None => inner.sessions.push(summary.clone()),
        }
        Ok(())
    }

    async fn save_sessions(&self, sessions: &[DailySummary]) -> Result<()> {
        self.check_writable()?;
        self.inner.lock().expect("store lock").sessions = sessions.to_vec();
        Ok(())
    }

    async fn clear_all(&self) -> Result<()> {
        self.check_writable()?;
        *self.inner.lock().expect("store lock") = Inner::default();
        Ok(())
    }
}
