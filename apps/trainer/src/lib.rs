//! Headless gojūon trainer application.
//!
//! Wires the pure core (`kana-core`) to persistence: an async storage
//! gateway, the interactive session service, and backup import/export.
//! Rendering, audio and notifications are out of scope; anything driving a
//! UI talks to [`session::StudySession`].

pub mod backup;
pub mod session;
pub mod storage;

pub use session::{Progress, SessionError, StudySession};
pub use storage::{FileStore, MemoryStore, StorageError, StorageGateway};
