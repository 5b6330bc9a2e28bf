//! Card status classification for dashboards.

use serde::{Deserialize, Serialize};

use crate::types::ReviewCard;

/// Where a card sits in its learning lifecycle.
///
/// The four statuses partition any collection: `Review` explicitly excludes
/// cards meeting the mastery bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    New,
    Learning,
    Review,
    Mastered,
}

const MASTERY_REPETITIONS: u32 = 4;
const MASTERY_INTERVAL_DAYS: u32 = 14;

/// Classify a single card.
pub fn classify(card: &ReviewCard) -> CardStatus {
    if card.is_new() {
        return CardStatus::New;
    }
    if card.repetitions >= MASTERY_REPETITIONS && card.interval >= MASTERY_INTERVAL_DAYS {
        return CardStatus::Mastered;
    }
    if card.repetitions < 2 {
        CardStatus::Learning
    } else {
        CardStatus::Review
    }
}

/// Status counts over a collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    pub new: usize,
    pub learning: usize,
    pub review: usize,
    pub mastered: usize,
    pub total: usize,
}

impl ProgressSummary {
    pub fn of(cards: &[ReviewCard]) -> Self {
        let mut summary = Self {
            total: cards.len(),
            ..Self::default()
        };
        for card in cards {
            match classify(card) {
                CardStatus::New => summary.new += 1,
                CardStatus::Learning => summary.learning += 1,
                CardStatus::Review => summary.review += 1,
                CardStatus::Mastered => summary.mastered += 1,
            }
        }
        summary
    }
}
