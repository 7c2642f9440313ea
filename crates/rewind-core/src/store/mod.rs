//! The document store: one append-only action log per document.
//!
//! The contract is deliberately narrow: atomic append, atomic snapshot
//! read, and document creation. No update or delete of logged actions
//! exists anywhere — corrections are themselves new actions.
//!
//! Concurrency: appends to the *same* document serialize and all succeed,
//! preserving a single total order; appends to *different* documents must
//! not block each other. Reads observe the log either before or after any
//! given append, never torn.

pub mod log;
pub mod memory;

pub use log::LogStore;
pub use memory::MemoryStore;

use crate::action::Action;
use crate::error::ErrorCode;
use crate::model::DocumentId;
use std::path::PathBuf;
use std::time::Duration;

/// Errors from the document store. Fatal for the current request; the core
/// never retries internally.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The named document does not exist in this store.
    #[error("document {0} not found")]
    DocumentNotFound(DocumentId),

    /// Reading or writing a log file failed.
    #[error("log i/o failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A log file exists but does not parse.
    #[error("corrupt action log {path} at line {line}: {reason}")]
    Corrupt {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// An advisory file lock could not be acquired in time.
    #[error("lock timed out after {waited:?} at {path}")]
    LockTimeout { path: PathBuf, waited: Duration },
}

impl StoreError {
    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::DocumentNotFound(_) => ErrorCode::DocumentNotFound,
            Self::Io { .. } => ErrorCode::LogWriteFailed,
            Self::Corrupt { .. } => ErrorCode::CorruptLog,
            Self::LockTimeout { .. } => ErrorCode::LockContention,
        }
    }
}

/// Per-document append/read primitives the engine builds on.
pub trait DocumentStore: Send + Sync {
    /// Create a new document owned by `owner`, seeded with exactly one
    /// action so the projection of a brand-new document is never empty.
    ///
    /// # Errors
    ///
    /// Fails only on store-level I/O problems.
    fn create_document(&self, owner: &str, seed: Action) -> Result<DocumentId, StoreError>;

    /// Append atomically to the end of the named document's log.
    ///
    /// Returns the new log length. Concurrent appends to the same document
    /// serialize; none are lost.
    ///
    /// # Errors
    ///
    /// [`StoreError::DocumentNotFound`] for an unknown id, otherwise
    /// store-level failures.
    fn append(&self, id: &DocumentId, action: Action) -> Result<usize, StoreError>;

    /// Return the full ordered log as a snapshot. Never a partial read.
    ///
    /// # Errors
    ///
    /// [`StoreError::DocumentNotFound`] for an unknown id, otherwise
    /// store-level failures.
    fn read(&self, id: &DocumentId) -> Result<Vec<Action>, StoreError>;

    /// Display name recorded when the document was created.
    ///
    /// # Errors
    ///
    /// [`StoreError::DocumentNotFound`] for an unknown id.
    fn owner(&self, id: &DocumentId) -> Result<String, StoreError>;
}
