//! JSON-file-backed store.
//!
//! One document per collection under a data directory. Writes go through a
//! temp file and rename so a crash mid-write leaves the previous document
//! intact.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use kana_core::{DailySummary, ReviewCard, ReviewLogEntry, Settings};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;

use super::{Result, StorageGateway};

const CARDS_FILE: &str = "cards.json";
const REVIEWS_FILE: &str = "reviews.json";
const SESSIONS_FILE: &str = "sessions.json";
const SETTINGS_FILE: &str = "settings.json";

/// On-disk store rooted at a data directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (creating if necessary) the data directory.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        tracing::info!(path = %root.display(), "opened data directory");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    async fn read_or<T: DeserializeOwned>(&self, name: &str, fallback: T) -> Result<T> {
        match fs::read(self.path(name)).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(fallback),
            Err(err) => Err(err.into()),
        }
    }

    async fn write<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        let tmp = self.path(&format!("{name}.tmp"));
        fs::write(&tmp, &bytes).await?;
        fs::rename(&tmp, self.path(name)).await?;
        Ok(())
    }
}

#[async_trait]
impl StorageGateway for FileStore {
    async fn get_cards(&self) -> Result<Vec<ReviewCard>> {
        self.read_or(CARDS_FILE, Vec::new()).await
    }

    async fn save_cards(&self, cards: &[ReviewCard]) -> Result<()> {
        self.write(CARDS_FILE, cards).await
    }

    async fn get_settings(&self) -> Result<Settings> {
        match fs::read(self.path(SETTINGS_FILE)).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(settings) => Ok(settings),
                Err(err) => {
                    tracing::warn!(%err, "stored settings unreadable, using defaults");
                    Ok(Settings::default())
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Settings::default()),
            Err(err) => Err(err.into()),
        }
    }

    async fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.write(SETTINGS_FILE, settings).await
    }

    async fn get_reviews(&self) -> Result<Vec<ReviewLogEntry>> {
        self.read_or(REVIEWS_FILE, Vec::new()).await
    }

    async fn append_review(&self, entry: &ReviewLogEntry) -> Result<()> {
        let mut reviews = self.get_reviews().await?;
        reviews.push(entry.clone());
        self.write(REVIEWS_FILE, &reviews).await
    }

    async fn save_reviews(&self, reviews: &[ReviewLogEntry]) -> Result<()> {
        self.write(REVIEWS_FILE, reviews).await
    }

    async fn get_sessions(&self) -> Result<Vec<DailySummary>> {
        let mut sessions: Vec<DailySummary> = self.read_or(SESSIONS_FILE, Vec::new()).await?;
        sessions.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(sessions)
    }

    async fn upsert_session(&self, summary: &DailySummary) -> Result<()> {
        let mut sessions = self.get_sessions().await?;
        match sessions.iter_mut().find(|s| s.date == summary.date) {
            Some(slot) => *slot = summary.clone(),
            None => sessions.push(summary.clone()),
        }
        self.write(SESSIONS_FILE, &sessions).await
    }

    async fn save_sessions(&self, sessions: &[DailySummary]) -> Result<()> {
        self.write(SESSIONS_FILE, sessions).await
    }

    async fn clear_all(&self) -> Result<()> {
        for name in [CARDS_FILE, REVIEWS_FILE, SESSIONS_FILE, SETTINGS_FILE] {
            match fs::remove_file(self.path(name)).await {
                Ok(()) => {}
                Err(err) if err.kind() == ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
        }
        tracing::info!("cleared all stored data");
        Ok(())
    }
}
