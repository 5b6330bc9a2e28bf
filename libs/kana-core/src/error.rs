//! Error types for kana-core.

use thiserror::Error;

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors produced by the core library.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("quality rating out of range: {0} (expected 0-5)")]
    InvalidQuality(u8),

    #[error("backup version {found} is newer than supported version {supported}")]
    BackupVersionTooNew { found: u32, supported: u32 },

    #[error("malformed backup payload: {0}")]
    MalformedBackup(String),
}
