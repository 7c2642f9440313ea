//! Identifiers and the projected task model.
//!
//! Tasks are never persisted — they exist only as projector output. The
//! identifiers are opaque random tokens minted by whoever originates an
//! action, never derived from log position.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, globally-unique task identifier.
///
/// A random 128-bit token rendered as 32 lowercase hex characters. Multiple
/// actions sharing a `TaskId` refer to the same logical task; ids are never
/// reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Mint a fresh random identifier.
    #[must_use]
    pub fn mint() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Wrap an existing identifier string without validation.
    #[must_use]
    pub fn new_unchecked(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of one document (one user's task list and its action log).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Mint a fresh random identifier.
    #[must_use]
    pub fn mint() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Wrap an existing identifier string without validation.
    #[must_use]
    pub fn new_unchecked(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A task as derived by the projector.
///
/// Ephemeral: the last qualifying action in the replayed prefix wins for
/// each field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque text payload. Not validated for size or format.
    pub content: String,
    /// Completion flag, false on (re-)add.
    pub checked: bool,
}

impl Task {
    /// A freshly added, unchecked task.
    #[must_use]
    pub const fn new(content: String) -> Self {
        Self {
            content,
            checked: false,
        }
    }
}

/// Projection output: tasks in first-appearance order.
///
/// Insertion-order semantics keep the display stable across re-renders.
pub type TaskMap = IndexMap<TaskId, Task>;
