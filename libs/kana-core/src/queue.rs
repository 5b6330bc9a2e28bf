//! Study queue construction.
//!
//! A session queue is built in four steps: scope filter, due cards, new
//! cards up to the day's remaining introduction allowance, then a cap at
//! the daily review limit. Due cards sit ahead of new cards so the cap
//! sheds introductions first. Ordering is a pluggable strategy so tests
//! can run without randomness.

use rand::seq::SliceRandom;

use crate::dates::local_day_start_ms;
use crate::types::{ReviewCard, Settings};

/// Final arrangement of a built queue.
pub trait OrderStrategy: Send + Sync {
    fn arrange(&self, cards: &mut Vec<ReviewCard>);
}

/// Keep the stable due-then-new order.
#[derive(Debug, Clone, Copy, Default)]
pub struct InOrder;

impl OrderStrategy for InOrder {
    fn arrange(&self, _cards: &mut Vec<ReviewCard>) {}
}

/// Uniform random permutation (Fisher-Yates).
#[derive(Debug, Clone, Copy, Default)]
pub struct Shuffled;

impl OrderStrategy for Shuffled {
    fn arrange(&self, cards: &mut Vec<ReviewCard>) {
        cards.shuffle(&mut rand::rng());
    }
}

/// Previously reviewed cards that have come due, in stable collection order.
pub fn due_cards(cards: &[ReviewCard], now_ms: i64) -> Vec<ReviewCard> {
    cards
        .iter()
        .filter(|card| card.is_due(now_ms))
        .cloned()
        .collect()
}

/// How many new cards may still be introduced today.
///
/// Counts cards first learned since local midnight against the daily limit.
/// A card that lapsed after its introduction still occupies its slot; the
/// allowance meters first exposure, not current mastery.
pub fn new_allowance(cards: &[ReviewCard], daily_new_cards: u32, now_ms: i64) -> usize {
    let day_start = local_day_start_ms(now_ms);
    let introduced_today = cards
        .iter()
        .filter(|card| card.first_learned_at.is_some_and(|at| at >= day_start))
        .count();
    (daily_new_cards as usize).saturating_sub(introduced_today)
}

/// Never-reviewed cards, up to today's remaining allowance.
pub fn new_cards(cards: &[ReviewCard], daily_new_cards: u32, now_ms: i64) -> Vec<ReviewCard> {
    let allowance = new_allowance(cards, daily_new_cards, now_ms);
    cards
        .iter()
        .filter(|card| card.is_new())
        .take(allowance)
        .cloned()
        .collect()
}

/// Build one session's queue.
pub fn build_queue(
    cards: &[ReviewCard],
    settings: &Settings,
    now_ms: i64,
    order: &dyn OrderStrategy,
) -> Vec<ReviewCard> {
    let eligible = scope_filter(cards, settings);
    let mut queue = due_cards(&eligible, now_ms);
    queue.extend(new_cards(&eligible, settings.daily_new_cards, now_ms));
    queue.truncate(settings.daily_reviews as usize);
    order.arrange(&mut queue);
    queue
}

/// Dashboard "due today" count: mirrors [`build_queue`]'s cap without
/// materializing the queue.
pub fn due_today_count(cards: &[ReviewCard], settings: &Settings, now_ms: i64) -> usize {
    let eligible = scope_filter(cards, settings);
    let due = eligible.iter().filter(|card| card.is_due(now_ms)).count();
    let fresh = new_cards(&eligible, settings.daily_new_cards, now_ms).len();
    (due + fresh).min(settings.daily_reviews as usize)
}

fn scope_filter(cards: &[ReviewCard], settings: &Settings) -> Vec<ReviewCard> {
    cards
        .iter()
        .filter(|card| settings.kana_scope.contains_id(&card.kana_id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, KanaScope};
    use crate::scheduler::{new_card, MS_PER_DAY};
    use pretty_assertions::assert_eq;

    const NOW: i64 = 1_700_000_000_000;

    fn settings() -> Settings {
        Settings {
            shuffle_cards: false,
            ..Settings::default()
        }
    }

    fn due(kana_id: &str) -> ReviewCard {
        ReviewCard {
            last_review_at: Some(NOW - 3 * MS_PER_DAY),
            first_learned_at: Some(NOW - 3 * MS_PER_DAY),
            next_review_at: NOW - MS_PER_DAY,
            repetitions: 1,
            interval: 2,
            ..new_card(kana_id, NOW - 3 * MS_PER_DAY)
        }
    }

    fn not_due(kana_id: &str) -> ReviewCard {
        ReviewCard {
            next_review_at: NOW + 5 * MS_PER_DAY,
            ..due(kana_id)
        }
    }

    fn learned_today(kana_id: &str) -> ReviewCard {
        ReviewCard {
            last_review_at: Some(NOW - 1),
            first_learned_at: Some(NOW - 1),
            next_review_at: NOW + MS_PER_DAY,
            ..new_card(kana_id, NOW - 1)
        }
    }

    fn fresh_collection() -> Vec<ReviewCard> {
        catalog::all()
            .iter()
            .map(|kana| new_card(kana.id, NOW))
            .collect()
    }

    #[test]
    fn due_cards_excludes_new_and_future() {
        let cards = vec![due("a"), not_due("i"), new_card("u", NOW)];
        let found = due_cards(&cards, NOW);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kana_id, "a");
    }

    #[test]
    fn new_cards_respect_daily_allowance() {
        let cards = fresh_collection();
        assert_eq!(new_cards(&cards, 20, NOW).len(), 20);
        assert_eq!(new_cards(&cards, 0, NOW).len(), 0);
    }

    #[test]
    fn cards_introduced_today_consume_the_allowance() {
        let mut cards = fresh_collection();
        cards[0] = learned_today("a");
        cards[1] = learned_today("i");
        assert_eq!(new_cards(&cards, 20, NOW).len(), 18);
    }

    #[test]
    fn lapsed_card_still_counts_as_introduced_today() {
        // Introduced and failed today: repetitions reset but the slot is
        // spent either way.
        let mut lapsed = learned_today("a");
        lapsed.repetitions = 0;
        lapsed.lapse_count = 1;

        let mut cards = fresh_collection();
        cards[0] = lapsed;
        assert_eq!(new_allowance(&cards, 20, NOW), 19);
    }

    #[test]
    fn allowance_never_goes_negative() {
        let cards: Vec<ReviewCard> = (0..30).map(|_| learned_today("a")).collect();
        assert_eq!(new_allowance(&cards, 20, NOW), 0);
    }

    #[test]
    fn yesterdays_introductions_do_not_count() {
        let old = ReviewCard {
            first_learned_at: Some(NOW - 2 * MS_PER_DAY),
            ..due("a")
        };
        assert_eq!(new_allowance(&[old], 20, NOW), 20);
    }

    #[test]
    fn queue_puts_due_before_new_without_shuffle() {
        let mut cards = fresh_collection();
        cards[5] = due("ka");
        let queue = build_queue(&cards, &settings(), NOW, &InOrder);
        assert_eq!(queue[0].kana_id, "ka");
        assert!(queue[1..].iter().all(|card| card.is_new()));
    }

    #[test]
    fn queue_never_exceeds_daily_reviews() {
        let cards: Vec<ReviewCard> = catalog::all()
            .iter()
            .map(|kana| due(kana.id))
            .collect();
        let config = Settings {
            daily_reviews: 7,
            ..settings()
        };
        assert_eq!(build_queue(&cards, &config, NOW, &InOrder).len(), 7);
    }

    #[test]
    fn cap_sheds_new_cards_first() {
        let mut cards = fresh_collection();
        for (slot, kana_id) in ["ka", "ki", "ku"].iter().enumerate() {
            cards[slot] = due(kana_id);
        }
        let config = Settings {
            daily_reviews: 4,
            ..settings()
        };
        let queue = build_queue(&cards, &config, NOW, &InOrder);
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.iter().filter(|card| card.is_due(NOW)).count(), 3);
        assert_eq!(queue.iter().filter(|card| card.is_new()).count(), 1);
    }

    #[test]
    fn scope_limits_queue_to_basic_kana() {
        let config = Settings {
            kana_scope: KanaScope::Seion,
            daily_new_cards: 200,
            daily_reviews: 200,
            ..settings()
        };
        let queue = build_queue(&fresh_collection(), &config, NOW, &InOrder);
        assert_eq!(queue.len(), 46);
        assert!(queue
            .iter()
            .all(|card| KanaScope::Seion.contains_id(&card.kana_id)));
    }

    #[test]
    fn shuffle_preserves_queue_membership() {
        let cards = fresh_collection();
        let plain = build_queue(&cards, &settings(), NOW, &InOrder);
        let shuffled = build_queue(&cards, &settings(), NOW, &Shuffled);

        let mut plain_ids: Vec<String> = plain.iter().map(|card| card.id.clone()).collect();
        let mut shuffled_ids: Vec<String> = shuffled.iter().map(|card| card.id.clone()).collect();
        plain_ids.sort();
        shuffled_ids.sort();
        assert_eq!(plain_ids, shuffled_ids);
    }

    #[test]
    fn due_today_matches_queue_length() {
        let mut cards = fresh_collection();
        cards[0] = due("a");
        cards[1] = not_due("i");
        let config = settings();
        let queue = build_queue(&cards, &config, NOW, &InOrder);
        assert_eq!(due_today_count(&cards, &config, NOW), queue.len());
    }

    #[test]
    fn due_today_is_capped_by_daily_reviews() {
        let cards: Vec<ReviewCard> = catalog::all()
            .iter()
            .map(|kana| due(kana.id))
            .collect();
        let config = Settings {
            daily_reviews: 10,
            ..settings()
        };
        assert_eq!(due_today_count(&cards, &config, NOW), 10);
    }
}
