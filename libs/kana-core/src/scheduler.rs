//! SM-2 spaced repetition scheduling.
//!
//! The transition follows SuperMemo 2 with two deliberate deviations: a
//! quality-5 review past the fixed early intervals earns a 1.3x easy bonus,
//! and a quality-3 review is shortened to 0.8x so shaky cards come back
//! sooner. The first two successful intervals stay fixed at 1 and 6 days
//! regardless of quality, as in standard SM-2.

use crate::types::{Quality, ReviewCard};

pub const INITIAL_EASE_FACTOR: f64 = 2.5;
pub const MIN_EASE_FACTOR: f64 = 1.3;
const EASY_BONUS: f64 = 1.3;
const HARD_INTERVAL_MULTIPLIER: f64 = 0.8;
const LAPSE_EASE_PENALTY: f64 = 0.2;

pub const MS_PER_DAY: i64 = 86_400_000;

/// Result of reviewing one card.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewOutcome {
    pub card: ReviewCard,
    pub is_correct: bool,
}

/// Fresh state for a kana that has never been studied.
pub fn new_card(kana_id: &str, now_ms: i64) -> ReviewCard {
    ReviewCard {
        id: format!("card_{kana_id}"),
        kana_id: kana_id.to_string(),
        ease_factor: INITIAL_EASE_FACTOR,
        interval: 0,
        repetitions: 0,
        next_review_at: now_ms,
        last_review_at: None,
        lapse_count: 0,
        first_learned_at: None,
    }
}

/// Compute the card's next state for a quality rating.
///
/// Pure: the caller supplies the clock, nothing is persisted here.
pub fn review(card: &ReviewCard, quality: Quality, now_ms: i64) -> ReviewOutcome {
    let is_correct = quality.is_correct();
    let mut next = card.clone();

    // First-ever review stamps first_learned_at; it never moves afterwards.
    if next.first_learned_at.is_none() && card.last_review_at.is_none() {
        next.first_learned_at = Some(now_ms);
    }

    if is_correct {
        next.repetitions += 1;

        let grade = f64::from(quality.value());
        let ease = card.ease_factor + (0.1 - (5.0 - grade) * (0.08 + (5.0 - grade) * 0.02));
        next.ease_factor = ease.max(MIN_EASE_FACTOR);

        next.interval = match next.repetitions {
            1 => 1,
            2 => 6,
            _ => {
                let mut interval = (f64::from(card.interval) * next.ease_factor).round();
                // Bonus and dampener only apply once the fixed early
                // intervals are behind the card.
                if quality == Quality::Perfect {
                    interval = (interval * EASY_BONUS).round();
                } else if quality == Quality::Difficult {
                    interval = (interval * HARD_INTERVAL_MULTIPLIER).round().max(1.0);
                }
                interval as u32
            }
        };
    } else {
        next.repetitions = 0;
        next.interval = 1;
        next.lapse_count += 1;
        next.ease_factor = (card.ease_factor - LAPSE_EASE_PENALTY).max(MIN_EASE_FACTOR);
    }

    next.next_review_at = now_ms + i64::from(next.interval) * MS_PER_DAY;
    next.last_review_at = Some(now_ms);

    ReviewOutcome { card: next, is_correct }
}
