//! Core types for the kana trainer.
//!
//! Persisted types use camelCase field names on the wire so stored JSON
//! documents and backup files share one schema.

use serde::{Deserialize, Serialize};

use crate::catalog::KanaScope;
use crate::error::CoreError;

/// Per-kana learning state. One card exists per catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCard {
    /// Stable identifier, always `card_{kana_id}`.
    pub id: String,
    pub kana_id: String,
    /// Interval growth multiplier, never below 1.3.
    pub ease_factor: f64,
    /// Days until the next review. 0 only before the first review.
    pub interval: u32,
    /// Consecutive correct reviews since the last lapse.
    pub repetitions: u32,
    /// When the card becomes due, epoch milliseconds.
    pub next_review_at: i64,
    /// Most recent review, None iff the card has never been reviewed.
    #[serde(default)]
    pub last_review_at: Option<i64>,
    /// Cumulative count of failed reviews.
    #[serde(default)]
    pub lapse_count: u32,
    /// Set exactly once, on the card's first-ever review. Bounds how many
    /// new cards may be introduced per calendar day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_learned_at: Option<i64>,
}

impl ReviewCard {
    /// A card is new until its first review.
    pub fn is_new(&self) -> bool {
        self.last_review_at.is_none()
    }

    /// Whether a previously reviewed card has come due.
    pub fn is_due(&self, now_ms: i64) -> bool {
        self.last_review_at.is_some() && self.next_review_at <= now_ms
    }
}

/// Self-reported recall grade for one review.
///
/// Serializes as its 0-5 numeric value. Out-of-range input is rejected at
/// the conversion boundary, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Quality {
    /// 0: no recall at all.
    Blackout,
    /// 1: wrong, remembered on seeing the answer.
    Wrong,
    /// 2: wrong, but the answer felt familiar.
    Almost,
    /// 3: recalled with serious difficulty.
    Difficult,
    /// 4: recalled easily.
    Good,
    /// 5: perfect, instant recall.
    Perfect,
}

impl Quality {
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Blackout),
            1 => Some(Self::Wrong),
            2 => Some(Self::Almost),
            3 => Some(Self::Difficult),
            4 => Some(Self::Good),
            5 => Some(Self::Perfect),
            _ => None,
        }
    }

    pub fn value(self) -> u8 {
        match self {
            Self::Blackout => 0,
            Self::Wrong => 1,
            Self::Almost => 2,
            Self::Difficult => 3,
            Self::Good => 4,
            Self::Perfect => 5,
        }
    }

    /// Grades of 3 and above count as a successful recall.
    pub fn is_correct(self) -> bool {
        self.value() >= 3
    }
}

impl TryFrom<u8> for Quality {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_value(value).ok_or(CoreError::InvalidQuality(value))
    }
}

impl From<Quality> for u8 {
    fn from(quality: Quality) -> Self {
        quality.value()
    }
}

/// User-configurable study settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// How many never-reviewed cards may be introduced per calendar day.
    pub daily_new_cards: u32,
    /// Upper bound on the whole session queue.
    pub daily_reviews: u32,
    pub kana_scope: KanaScope,
    pub shuffle_cards: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_backup_time: Option<i64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            daily_new_cards: 20,
            daily_reviews: 100,
            kana_scope: KanaScope::All,
            shuffle_cards: true,
            last_backup_time: None,
        }
    }
}

/// One line of the append-only review log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewLogEntry {
    pub card_id: String,
    pub timestamp: i64,
    pub quality: Quality,
    #[serde(default)]
    pub time_spent_ms: i64,
}

/// Per-calendar-day study aggregate, keyed by local `YYYY-MM-DD` date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub date: String,
    pub cards_reviewed: u32,
    pub correct_count: u32,
    /// Running mean response time in seconds.
    pub average_time: f64,
}

impl DailySummary {
    pub fn empty(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            cards_reviewed: 0,
            correct_count: 0,
            average_time: 0.0,
        }
    }

    /// Fold one review into the aggregate. The running mean must be scaled
    /// by the count *before* this review, or every sample after the first
    /// gets under-weighted.
    pub fn record_review(&mut self, correct: bool, time_spent_secs: f64) {
        let total_time = self.average_time * f64::from(self.cards_reviewed) + time_spent_secs;
        self.cards_reviewed += 1;
        if correct {
            self.correct_count += 1;
        }
        self.average_time = total_time / f64::from(self.cards_reviewed);
    }
}
