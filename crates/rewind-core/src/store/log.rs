//! File-backed document store: one append-only log file per document.
//!
//! # Log format
//!
//! ```text
//! # rewind action log v1
//! # fields: recorded_at_us\taction
//! 1708012200123456\t{"type":"add","id":"…","content":"feed the cat"}
//! ```
//!
//! One tab-separated row per action: wall-clock microseconds since the Unix
//! epoch, then the action as compact JSON. The timestamp is audit metadata
//! only — replay never consults it. JSON string escaping guarantees the
//! one-line invariant even when content contains newlines.
//!
//! # Locking
//!
//! Advisory file locks (`fs2`) with a bounded wait: exclusive for append
//! and create, shared for reads. Locks are per document, so writers to
//! different documents never contend.

use super::{DocumentStore, StoreError};
use crate::action::Action;
use crate::model::DocumentId;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Header line written at the start of every new log file.
pub const LOG_HEADER: &str = "# rewind action log v1";

/// Field-description comment written after the header.
pub const FIELD_COMMENT: &str = "# fields: recorded_at_us\taction";

/// How long lock acquisition may wait before giving up.
const LOCK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Copy)]
enum LockKind {
    Shared,
    Exclusive,
}

/// RAII advisory lock on one document's lock file.
struct LogLock {
    file: File,
}

impl LogLock {
    fn acquire(path: &Path, kind: LockKind) -> Result<Self, StoreError> {
        let map_io = |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        let start = Instant::now();
        loop {
            let file = OpenOptions::new()
                .create(true)
                .read(true)
                .write(true)
                .truncate(false)
                .open(path)
                .map_err(map_io)?;

            let locked = match kind {
                LockKind::Shared => file.try_lock_shared().is_ok(),
                LockKind::Exclusive => file.try_lock_exclusive().is_ok(),
            };
            if locked {
                return Ok(Self { file });
            }

            if start.elapsed() >= LOCK_TIMEOUT {
                return Err(StoreError::LockTimeout {
                    path: path.to_path_buf(),
                    waited: start.elapsed(),
                });
            }
            thread::sleep(Duration::from_millis(10));
        }
    }
}

impl Drop for LogLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct DocumentMeta {
    owner: String,
    created_at_us: i64,
}

/// Store keeping each document as a log file plus a meta sidecar in `dir`.
#[derive(Debug, Clone)]
pub struct LogStore {
    dir: PathBuf,
}

impl LogStore {
    /// Open (creating if needed) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// Root directory of this store.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn log_path(&self, id: &DocumentId) -> PathBuf {
        self.dir.join(format!("{id}.log"))
    }

    fn meta_path(&self, id: &DocumentId) -> PathBuf {
        self.dir.join(format!("{id}.meta.json"))
    }

    fn lock_path(&self, id: &DocumentId) -> PathBuf {
        self.dir.join(format!("{id}.lock"))
    }

    /// Read and parse the log file. Caller must hold the document lock.
    fn read_locked(&self, id: &DocumentId) -> Result<Vec<Action>, StoreError> {
        let path = self.log_path(id);
        if !path.exists() {
            return Err(StoreError::DocumentNotFound(id.clone()));
        }
        let raw = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        parse_log(&path, &raw)
    }
}

/// Serialize one action to a log row (without the trailing newline).
fn to_log_row(path: &Path, recorded_at_us: i64, action: &Action) -> Result<String, StoreError> {
    // Compact JSON; serde escapes control characters, so the row is one line.
    let json = serde_json::to_string(action).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        line: 0,
        reason: format!("unserializable action: {source}"),
    })?;
    Ok(format!("{recorded_at_us}\t{json}"))
}

fn parse_log(path: &Path, raw: &str) -> Result<Vec<Action>, StoreError> {
    let mut actions = Vec::new();
    for (idx, line) in raw.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let corrupt = |reason: String| StoreError::Corrupt {
            path: path.to_path_buf(),
            line: idx + 1,
            reason,
        };
        let (ts, json) = line
            .split_once('\t')
            .ok_or_else(|| corrupt("missing tab separator".into()))?;
        ts.parse::<i64>()
            .map_err(|e| corrupt(format!("bad timestamp: {e}")))?;
        let action: Action =
            serde_json::from_str(json).map_err(|e| corrupt(format!("bad action JSON: {e}")))?;
        actions.push(action);
    }
    Ok(actions)
}

impl DocumentStore for LogStore {
    fn create_document(&self, owner: &str, seed: Action) -> Result<DocumentId, StoreError> {
        let id = DocumentId::mint();
        let _lock = LogLock::acquire(&self.lock_path(&id), LockKind::Exclusive)?;

        let meta = DocumentMeta {
            owner: owner.to_string(),
            created_at_us: chrono::Utc::now().timestamp_micros(),
        };
        let meta_path = self.meta_path(&id);
        let meta_json =
            serde_json::to_string_pretty(&meta).map_err(|source| StoreError::Corrupt {
                path: meta_path.clone(),
                line: 0,
                reason: format!("unserializable meta: {source}"),
            })?;
        fs::write(&meta_path, meta_json).map_err(|source| StoreError::Io {
            path: meta_path,
            source,
        })?;

        let path = self.log_path(&id);
        let row = to_log_row(&path, meta.created_at_us, &seed)?;
        let contents = format!("{LOG_HEADER}\n{FIELD_COMMENT}\n{row}\n");
        fs::write(&path, contents).map_err(|source| StoreError::Io { path, source })?;

        debug!(document = %id, owner, "created document log");
        Ok(id)
    }

    fn append(&self, id: &DocumentId, action: Action) -> Result<usize, StoreError> {
        let _lock = LogLock::acquire(&self.lock_path(id), LockKind::Exclusive)?;
        // Existing rows are re-parsed under the lock so length reporting and
        // corruption detection happen before the write.
        let existing = self.read_locked(id)?;

        let path = self.log_path(id);
        let row = to_log_row(&path, chrono::Utc::now().timestamp_micros(), &action)?;
        let mut file = OpenOptions::new()
            .append(true)
            .open(&path)
            .map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
        writeln!(file, "{row}").map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        file.sync_all().map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        Ok(existing.len() + 1)
    }

    fn read(&self, id: &DocumentId) -> Result<Vec<Action>, StoreError> {
        let _lock = LogLock::acquire(&self.lock_path(id), LockKind::Shared)?;
        self.read_locked(id)
    }

    fn owner(&self, id: &DocumentId) -> Result<String, StoreError> {
        let path = self.meta_path(id);
        if !path.exists() {
            return Err(StoreError::DocumentNotFound(id.clone()));
        }
        let raw = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let meta: DocumentMeta =
            serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
                path,
                line: 0,
                reason: format!("bad meta JSON: {e}"),
            })?;
        if meta.owner.is_empty() {
            warn!(document = %id, "document meta has empty owner");
        }
        Ok(meta.owner)
    }
}
