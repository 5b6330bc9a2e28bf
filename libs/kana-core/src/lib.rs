//! Core library for the gojūon kana trainer.
//!
//! Provides:
//! - The immutable kana catalog and scope filtering
//! - SM-2 spaced repetition scheduling
//! - Study queue construction with daily limits
//! - Status classification and progress counts
//! - Collection normalization against the catalog
//! - Backup schema and merge rules
//!
//! Everything here is pure and synchronous; persistence and clocks are the
//! caller's concern.

pub mod backup;
pub mod catalog;
pub mod dates;
pub mod error;
pub mod normalize;
pub mod queue;
pub mod scheduler;
pub mod status;
pub mod types;

pub use backup::{BackupData, BACKUP_VERSION};
pub use catalog::{Kana, KanaClass, KanaScope};
pub use error::{CoreError, Result};
pub use normalize::normalize_cards;
pub use queue::{build_queue, due_today_count, InOrder, OrderStrategy, Shuffled};
pub use scheduler::{new_card, review, ReviewOutcome, MS_PER_DAY};
pub use status::{classify, CardStatus, ProgressSummary};
pub use types::{DailySummary, Quality, ReviewCard, ReviewLogEntry, Settings};
