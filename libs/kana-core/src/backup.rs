//! Backup document schema and merge rules.
//!
//! A backup is a single JSON document holding every persisted collection.
//! Importing merges rather than overwrites, so restoring an old backup can
//! never roll back newer progress: per card the more recently reviewed copy
//! wins, the review log is deduplicated, and daily aggregates keep the
//! fuller record per day.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::dates::normalize_date_key;
use crate::error::{CoreError, Result};
use crate::types::{DailySummary, ReviewCard, ReviewLogEntry, Settings};

pub const BACKUP_VERSION: u32 = 1;

/// The full exported state of one store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupData {
    pub cards: Vec<ReviewCard>,
    pub reviews: Vec<ReviewLogEntry>,
    pub sessions: Vec<DailySummary>,
    pub settings: Settings,
    pub backup_version: u32,
    pub last_modified: i64,
}

/// Check a parsed backup before any merge is attempted.
pub fn validate(backup: &BackupData) -> Result<()> {
    if backup.backup_version == 0 {
        return Err(CoreError::MalformedBackup(
            "missing backup version".to_string(),
        ));
    }
    if backup.backup_version > BACKUP_VERSION {
        return Err(CoreError::BackupVersionTooNew {
            found: backup.backup_version,
            supported: BACKUP_VERSION,
        });
    }
    Ok(())
}

/// Merge two backups into one. Pure; neither input is modified.
pub fn merge(local: &BackupData, remote: &BackupData) -> BackupData {
    let settings = if remote.last_modified > local.last_modified {
        remote.settings.clone()
    } else {
        local.settings.clone()
    };

    BackupData {
        cards: merge_cards(&local.cards, &remote.cards),
        reviews: merge_reviews(&local.reviews, &remote.reviews),
        sessions: merge_sessions(&local.sessions, &remote.sessions),
        settings,
        backup_version: BACKUP_VERSION,
        last_modified: local.last_modified.max(remote.last_modified),
    }
}

/// Per card id, the copy with the more recent review wins. A never-reviewed
/// copy loses to any reviewed one.
pub fn merge_cards(local: &[ReviewCard], remote: &[ReviewCard]) -> Vec<ReviewCard> {
    let mut merged: Vec<ReviewCard> = local.to_vec();
    let mut index: HashMap<String, usize> = merged
        .iter()
        .enumerate()
        .map(|(slot, card)| (card.id.clone(), slot))
        .collect();

    for card in remote {
        match index.get(&card.id) {
            Some(&slot) => {
                let kept = merged[slot].last_review_at.unwrap_or(0);
                if card.last_review_at.unwrap_or(0) > kept {
                    merged[slot] = card.clone();
                }
            }
            None => {
                index.insert(card.id.clone(), merged.len());
                merged.push(card.clone());
            }
        }
    }

    merged
}

/// Union of both logs, deduplicated on `(card_id, timestamp)`, in
/// chronological order.
pub fn merge_reviews(local: &[ReviewLogEntry], remote: &[ReviewLogEntry]) -> Vec<ReviewLogEntry> {
    let mut seen: HashSet<(String, i64)> = HashSet::new();
    let mut merged: Vec<ReviewLogEntry> = Vec::new();

    for entry in local.iter().chain(remote) {
        if seen.insert((entry.card_id.clone(), entry.timestamp)) {
            merged.push(entry.clone());
        }
    }

    merged.sort_by_key(|entry| entry.timestamp);
    merged
}

/// Per normalized date, keep the record that saw more reviews.
pub fn merge_sessions(local: &[DailySummary], remote: &[DailySummary]) -> Vec<DailySummary> {
    let mut by_date: BTreeMap<String, DailySummary> = BTreeMap::new();

    for summary in local {
        let date = normalize_date_key(&summary.date);
        by_date.insert(date.clone(), DailySummary { date, ..summary.clone() });
    }
    for summary in remote {
        let date = normalize_date_key(&summary.date);
        let replace = by_date
            .get(&date)
            .is_none_or(|kept| summary.cards_reviewed > kept.cards_reviewed);
        if replace {
            by_date.insert(date.clone(), DailySummary { date, ..summary.clone() });
        }
    }

    by_date.into_values().collect()
}
