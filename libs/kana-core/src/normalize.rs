//! Reconciling the stored card collection against the catalog.

use std::collections::HashMap;

use crate::catalog;
use crate::scheduler::new_card;
use crate::types::ReviewCard;

/// Rebuild the collection so exactly one card exists per catalog kana.
///
/// Orphaned cards (kana no longer in the catalog) are dropped. Duplicate
/// cards for one kana keep the copy with the more recent review, breaking
/// ties on the higher repetition count. Kana without a card get a fresh one
/// stamped with `now_ms`. Output follows catalog order; the pass is
/// tolerant and idempotent.
pub fn normalize_cards(cards: &[ReviewCard], now_ms: i64) -> Vec<ReviewCard> {
    let mut by_kana: HashMap<&str, &ReviewCard> = HashMap::new();

    for card in cards {
        if catalog::find(&card.kana_id).is_none() {
            continue;
        }
        match by_kana.get(card.kana_id.as_str()) {
            None => {
                by_kana.insert(&card.kana_id, card);
            }
            Some(existing) => {
                let kept = existing.last_review_at.unwrap_or(0);
                let candidate = card.last_review_at.unwrap_or(0);
                if candidate > kept
                    || (candidate == kept && card.repetitions > existing.repetitions)
                {
                    by_kana.insert(&card.kana_id, card);
                }
            }
        }
    }

    catalog::all()
        .iter()
        .map(|kana| match by_kana.get(kana.id) {
            Some(card) => (*card).clone(),
            None => new_card(kana.id, now_ms),
        })
        .collect()
}
