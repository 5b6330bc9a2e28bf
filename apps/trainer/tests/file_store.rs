//! FileStore persistence tests.

mod common;

use common::{due_card, now_ms};
use gojuon_trainer::storage::{FileStore, StorageGateway};
use kana_core::{DailySummary, Quality, ReviewLogEntry, Settings};
use pretty_assertions::assert_eq;

async fn open_store(dir: &tempfile::TempDir) -> FileStore {
    FileStore::open(dir.path()).await.unwrap()
}

#[tokio::test]
async fn missing_files_read_as_empty_and_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir).await;

    assert!(store.get_cards().await.unwrap().is_empty());
    assert!(store.get_reviews().await.unwrap().is_empty());
    assert!(store.get_sessions().await.unwrap().is_empty());
    assert_eq!(store.get_settings().await.unwrap(), Settings::default());
}

#[tokio::test]
async fn cards_survive_a_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let cards = vec![due_card("a", now_ms()), due_card("shi", now_ms())];
    {
        let store = open_store(&dir).await;
        store.save_cards(&cards).await.unwrap();
    }

    let store = open_store(&dir).await;
    assert_eq!(store.get_cards().await.unwrap(), cards);
}

#[tokio::test]
async fn append_review_accumulates() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir).await;

    for timestamp in [100, 200] {
        store
            .append_review(&ReviewLogEntry {
                card_id: "card_a".to_string(),
                timestamp,
                quality: Quality::Good,
                time_spent_ms: 1_000,
            })
            .await
            .unwrap();
    }

    let log = store.get_reviews().await.unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(log[1].timestamp, 200);
}

#[tokio::test]
async fn upsert_session_replaces_by_date() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir).await;

    let mut day = DailySummary::empty("2024-03-01");
    day.record_review(true, 2.0);
    store.upsert_session(&day).await.unwrap();

    day.record_review(false, 4.0);
    store.upsert_session(&day).await.unwrap();
    store
        .upsert_session(&DailySummary::empty("2024-02-28"))
        .await
        .unwrap();

    let sessions = store.get_sessions().await.unwrap();
    assert_eq!(sessions.len(), 2);
    // Ordered by date.
    assert_eq!(sessions[0].date, "2024-02-28");
    assert_eq!(sessions[1].cards_reviewed, 2);
}

#[tokio::test]
async fn corrupt_settings_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    tokio::fs::write(dir.path().join("settings.json"), b"{nonsense")
        .await
        .unwrap();

    let store = open_store(&dir).await;
    assert_eq!(store.get_settings().await.unwrap(), Settings::default());
}

#[tokio::test]
async fn corrupt_cards_surface_an_error() {
    let dir = tempfile::tempdir().unwrap();
    tokio::fs::write(dir.path().join("cards.json"), b"{nonsense")
        .await
        .unwrap();

    let store = open_store(&dir).await;
    assert!(store.get_cards().await.is_err());
}

#[tokio::test]
async fn clear_all_removes_every_collection() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir).await;

    store.save_cards(&[due_card("a", now_ms())]).await.unwrap();
    store
        .save_settings(&Settings {
            daily_reviews: 5,
            ..Settings::default()
        })
        .await
        .unwrap();

    store.clear_all().await.unwrap();
    assert!(store.get_cards().await.unwrap().is_empty());
    assert_eq!(store.get_settings().await.unwrap(), Settings::default());
}
