//! Backup export and import.
//!
//! Export snapshots every collection into one [`BackupData`] document.
//! Import parses and validates the incoming payload first, merges it with a
//! fresh local export using the core merge rules, and only then writes
//! anything back, so a malformed payload can never leave partial state.

use chrono::Utc;
use kana_core::backup::{self, BackupData, BACKUP_VERSION};
use kana_core::CoreError;
use serde::Serialize;
use thiserror::Error;

use crate::storage::{StorageError, StorageGateway};

#[derive(Debug, Error)]
pub enum BackupError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Invalid(#[from] CoreError),
}

/// What an import changed.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ImportSummary {
    pub cards: usize,
    pub reviews: usize,
    pub sessions: usize,
    pub timestamp: i64,
}

/// Snapshot the store into a backup document.
pub async fn export<S: StorageGateway>(store: &S) -> Result<BackupData, BackupError> {
    let (cards, reviews, sessions, settings) = tokio::try_join!(
        store.get_cards(),
        store.get_reviews(),
        store.get_sessions(),
        store.get_settings(),
    )?;

    Ok(BackupData {
        cards,
        reviews,
        sessions,
        settings,
        backup_version: BACKUP_VERSION,
        last_modified: Utc::now().timestamp_millis(),
    })
}

/// Serialize a backup for export.
pub fn to_json(backup: &BackupData) -> Result<String, BackupError> {
    serde_json::to_string_pretty(backup).map_err(|err| StorageError::from(err).into())
}

/// Parse and validate a backup payload without touching the store.
pub fn parse(json: &str) -> Result<BackupData, BackupError> {
    let mut value: serde_json::Value = serde_json::from_str(json)
        .map_err(|err| CoreError::MalformedBackup(err.to_string()))?;

    // Early exports carried the version under `syncVersion`.
    if let Some(object) = value.as_object_mut() {
        if !object.contains_key("backupVersion") {
            if let Some(version) = object.remove("syncVersion") {
                object.insert("backupVersion".to_string(), version);
            }
        }
    }

    let data: BackupData = serde_json::from_value(value)
        .map_err(|err| CoreError::MalformedBackup(err.to_string()))?;
    backup::validate(&data)?;
    Ok(data)
}

/// Merge a backup payload into the store.
pub async fn import<S: StorageGateway>(
    store: &S,
    json: &str,
) -> Result<ImportSummary, BackupError> {
    let incoming = parse(json)?;

    let local = export(store).await?;
    let mut merged = backup::merge(&local, &incoming);

    let now = Utc::now().timestamp_millis();
    merged.settings.last_backup_time = Some(now);

    tokio::try_join!(
        store.save_cards(&merged.cards),
        store.save_reviews(&merged.reviews),
        store.save_sessions(&merged.sessions),
        store.save_settings(&merged.settings),
    )?;

    tracing::info!(
        cards = merged.cards.len(),
        reviews = merged.reviews.len(),
        sessions = merged.sessions.len(),
        "backup imported"
    );

    Ok(ImportSummary {
        cards: merged.cards.len(),
        reviews: merged.reviews.len(),
        sessions: merged.sessions.len(),
        timestamp: now,
    })
}
