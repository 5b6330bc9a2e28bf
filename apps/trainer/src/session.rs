//! Interactive study session state.
//!
//! Owns the normalized card collection, the session queue and the progress
//! counters, and drives the core scheduler on each submitted review. State
//! is explicit and injectable: the session holds a storage gateway and
//! nothing else reaches persistence.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::Utc;
use kana_core::dates::{local_date_key, normalize_date_key};
use kana_core::queue::{build_queue, due_today_count, InOrder, Shuffled};
use kana_core::scheduler;
use kana_core::status::ProgressSummary;
use kana_core::{
    CoreError, DailySummary, OrderStrategy, Quality, ReviewCard, ReviewLogEntry, Settings,
};
use serde::Serialize;
use thiserror::Error;

use crate::storage::{StorageError, StorageGateway};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Dashboard counts for the current collection and settings.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Progress {
    pub new: usize,
    pub learning: usize,
    pub review: usize,
    pub mastered: usize,
    pub total: usize,
    pub due_today: usize,
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// One user's study state, loaded from and persisted through a gateway.
pub struct StudySession<S> {
    store: Arc<S>,
    cards: Vec<ReviewCard>,
    settings: Settings,
    queue: VecDeque<ReviewCard>,
    total_queue_size: usize,
    completed: usize,
}

impl<S: StorageGateway> StudySession<S> {
    /// Load settings and cards, normalizing the collection against the
    /// catalog. The cleaned collection is written back if normalization
    /// changed anything.
    pub async fn load(store: Arc<S>) -> Result<Self, SessionError> {
        let settings = store.get_settings().await?;
        let saved = store.get_cards().await?;
        let cards = kana_core::normalize_cards(&saved, now_ms());
        if cards != saved {
            tracing::info!(
                before = saved.len(),
                after = cards.len(),
                "normalized card collection"
            );
            store.save_cards(&cards).await?;
        }

        Ok(Self {
            store,
            cards,
            settings,
            queue: VecDeque::new(),
            total_queue_size: 0,
            completed: 0,
        })
    }

    /// Build a fresh queue and reset the session counters.
    pub fn start(&mut self) {
        let order: Box<dyn OrderStrategy> = if self.settings.shuffle_cards {
            Box::new(Shuffled)
        } else {
            Box::new(InOrder)
        };
        let queue = build_queue(&self.cards, &self.settings, now_ms(), order.as_ref());
        tracing::debug!(size = queue.len(), "session queue built");

        self.total_queue_size = queue.len();
        self.completed = 0;
        self.queue = queue.into();
    }

    /// The card currently being studied, if any.
    pub fn current(&self) -> Option<&ReviewCard> {
        self.queue.front()
    }

    /// Submit the quality rating for the current card.
    ///
    /// In-memory state advances first so the next card is available
    /// immediately; persistence is then awaited and any failure is returned
    /// without rolling the session back. Returns `None` when the queue is
    /// already empty, otherwise whether the answer counted as correct.
    pub async fn submit_review(
        &mut self,
        quality: Quality,
        time_spent_ms: i64,
    ) -> Result<Option<bool>, SessionError> {
        let Some(card) = self.queue.pop_front() else {
            return Ok(None);
        };
        let now = now_ms();
        let outcome = scheduler::review(&card, quality, now);

        if let Some(slot) = self.cards.iter_mut().find(|c| c.id == outcome.card.id) {
            *slot = outcome.card.clone();
        }
        self.completed += 1;

        let entry = ReviewLogEntry {
            card_id: outcome.card.id.clone(),
            timestamp: now,
            quality,
            time_spent_ms,
        };
        // The collection save and the log append are independent; the daily
        // aggregate is a read-modify-write and runs after them.
        tokio::try_join!(
            self.store.save_cards(&self.cards),
            self.store.append_review(&entry),
        )?;
        self.record_daily_summary(outcome.is_correct, time_spent_ms, now)
            .await?;

        Ok(Some(outcome.is_correct))
    }

    /// [`submit_review`](Self::submit_review) for a raw 0-5 rating, as
    /// delivered by an input surface. Out-of-range values are rejected
    /// before any state changes; nothing is clamped.
    pub async fn submit_review_value(
        &mut self,
        quality: u8,
        time_spent_ms: i64,
    ) -> Result<Option<bool>, SessionError> {
        let quality = Quality::try_from(quality)?;
        self.submit_review(quality, time_spent_ms).await
    }

    async fn record_daily_summary(
        &self,
        correct: bool,
        time_spent_ms: i64,
        now: i64,
    ) -> Result<(), SessionError> {
        let today = local_date_key(now);
        let sessions = self.store.get_sessions().await?;
        let existing = sessions
            .into_iter()
            .find(|s| normalize_date_key(&s.date) == today);
        let mut summary = match existing {
            Some(record) => DailySummary {
                date: today,
                ..record
            },
            None => DailySummary::empty(today),
        };
        summary.record_review(correct, time_spent_ms as f64 / 1000.0);
        self.store.upsert_session(&summary).await?;
        Ok(())
    }

    /// Status partition plus the capped "due today" count.
    pub fn progress(&self) -> Progress {
        let eligible: Vec<ReviewCard> = self
            .cards
            .iter()
            .filter(|card| self.settings.kana_scope.contains_id(&card.kana_id))
            .cloned()
            .collect();
        let summary = ProgressSummary::of(&eligible);

        Progress {
            new: summary.new,
            learning: summary.learning,
            review: summary.review,
            mastered: summary.mastered,
            total: summary.total,
            due_today: due_today_count(&self.cards, &self.settings, now_ms()),
        }
    }

    /// Replace the settings and persist them.
    pub async fn update_settings(&mut self, settings: Settings) -> Result<(), SessionError> {
        self.settings = settings;
        self.store.save_settings(&self.settings).await?;
        Ok(())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn cards(&self) -> &[ReviewCard] {
        &self.cards
    }

    /// Queue size fixed at session start.
    pub fn total_queue_size(&self) -> usize {
        self.total_queue_size
    }

    /// Reviews submitted this session.
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Cards still waiting in the queue.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}
