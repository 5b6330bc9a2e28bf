//! Shared fixtures for trainer integration tests.

#![allow(dead_code)]

use chrono::Utc;
use kana_core::scheduler::{new_card, MS_PER_DAY};
use kana_core::{KanaScope, ReviewCard, Settings};

pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Settings with shuffling disabled so queue order is deterministic.
pub fn deterministic_settings() -> Settings {
    Settings {
        shuffle_cards: false,
        ..Settings::default()
    }
}

pub fn scoped_settings(scope: KanaScope) -> Settings {
    Settings {
        kana_scope: scope,
        ..deterministic_settings()
    }
}

/// A card reviewed three days ago that has come due.
pub fn due_card(kana_id: &str, now: i64) -> ReviewCard {
    ReviewCard {
        last_review_at: Some(now - 3 * MS_PER_DAY),
        first_learned_at: Some(now - 3 * MS_PER_DAY),
        next_review_at: now - MS_PER_DAY,
        repetitions: 2,
        interval: 2,
        ..new_card(kana_id, now - 3 * MS_PER_DAY)
    }
}

/// A card first learned moments ago, due tomorrow.
pub fn learned_today(kana_id: &str, now: i64) -> ReviewCard {
    ReviewCard {
        last_review_at: Some(now - 1),
        first_learned_at: Some(now - 1),
        next_review_at: now + MS_PER_DAY,
        repetitions: 1,
        interval: 1,
        ..new_card(kana_id, now - 1)
    }
}
