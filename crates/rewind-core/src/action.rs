//! The action model: immutable records of intended mutations.
//!
//! Every change to a task list is expressed as one [`Action`] appended to a
//! document's log. Actions are never updated or removed — corrections are
//! themselves new actions (`Edit`, `Delete`).
//!
//! # Wire format
//!
//! Actions serialize as a JSON object tagged by `type`:
//!
//! ```json
//! {"type":"add","id":"<32 hex chars>","content":"feed the cat"}
//! ```
//!
//! The tag, `id`, and `content` are the only serialization contract a store
//! has to preserve.
//!
//! # Forward compatibility
//!
//! An action whose tag is unrecognized, or whose fields do not match the
//! known schema, deserializes to [`Action::Unknown`] carrying the raw JSON
//! value. Unknown actions re-serialize verbatim and never abort replay —
//! the projector skips them.

use crate::model::TaskId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One intended mutation, tagged by type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Insert or reset a task. Re-adding an existing id silently resets it.
    Add { id: TaskId, content: String },
    /// Remove a task. No-op if the id is absent.
    Delete { id: TaskId },
    /// Replace a task's content. Ignored if the id is absent.
    Edit { id: TaskId, content: String },
    /// Mark a task checked. Ignored if the id is absent.
    Check { id: TaskId },
    /// Mark a task unchecked. Ignored if the id is absent.
    Uncheck { id: TaskId },
    /// Unrecognized or malformed action, preserved verbatim for replay by
    /// future versions.
    Unknown(serde_json::Value),
}

/// Serde mirror covering the known catalog. `Action` dispatches to this for
/// known variants and falls back to `Unknown` when decoding fails.
#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Known {
    Add { id: TaskId, content: String },
    Delete { id: TaskId },
    Edit { id: TaskId, content: String },
    Check { id: TaskId },
    Uncheck { id: TaskId },
}

impl From<Known> for Action {
    fn from(known: Known) -> Self {
        match known {
            Known::Add { id, content } => Self::Add { id, content },
            Known::Delete { id } => Self::Delete { id },
            Known::Edit { id, content } => Self::Edit { id, content },
            Known::Check { id } => Self::Check { id },
            Known::Uncheck { id } => Self::Uncheck { id },
        }
    }
}

impl Action {
    /// Return the canonical tag string.
    ///
    /// For `Unknown` actions this is whatever the raw value carries in its
    /// `type` field, or `"unknown"` if there is none.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Add { .. } => "add",
            Self::Delete { .. } => "delete",
            Self::Edit { .. } => "edit",
            Self::Check { .. } => "check",
            Self::Uncheck { .. } => "uncheck",
            Self::Unknown(value) => value
                .get("type")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown"),
        }
    }

    /// Return the targeted task id, if this action has one.
    #[must_use]
    pub const fn task_id(&self) -> Option<&TaskId> {
        match self {
            Self::Add { id, .. }
            | Self::Delete { id }
            | Self::Edit { id, .. }
            | Self::Check { id }
            | Self::Uncheck { id } => Some(id),
            Self::Unknown(_) => None,
        }
    }
}

impl Serialize for Action {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Add { id, content } => Known::Add {
                id: id.clone(),
                content: content.clone(),
            }
            .serialize(serializer),
            Self::Delete { id } => Known::Delete { id: id.clone() }.serialize(serializer),
            Self::Edit { id, content } => Known::Edit {
                id: id.clone(),
                content: content.clone(),
            }
            .serialize(serializer),
            Self::Check { id } => Known::Check { id: id.clone() }.serialize(serializer),
            Self::Uncheck { id } => Known::Uncheck { id: id.clone() }.serialize(serializer),
            Self::Unknown(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Two-pass: decode to a raw value first, then try the known catalog.
        // Any mismatch (unknown tag, missing field, wrong field type) lands
        // in `Unknown` instead of failing replay.
        let value = serde_json::Value::deserialize(deserializer)?;
        match serde_json::from_value::<Known>(value.clone()) {
            Ok(known) => Ok(known.into()),
            Err(_) => Ok(Self::Unknown(value)),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add { id, content } => write!(f, "add {id} {}", preview(content)),
            Self::Delete { id } => write!(f, "delete {id}"),
            Self::Edit { id, content } => write!(f, "edit {id} {}", preview(content)),
            Self::Check { id } => write!(f, "check {id}"),
            Self::Uncheck { id } => write!(f, "uncheck {id}"),
            Self::Unknown(_) => write!(f, "{} (ignored)", self.kind()),
        }
    }
}

fn preview(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(40).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
