//! Per-session context: which document a client talks to and where its
//! time-travel cursor points.
//!
//! Sessions are explicit state passed into every core call — no implicit
//! global store. A session is created on first contact: the identity
//! provider supplies a display name, and the backing document is seeded
//! with exactly one starter `Add` so a brand-new projection is never
//! empty.

use crate::action::Action;
use crate::cursor::Cursor;
use crate::identity::IdentityProvider;
use crate::model::{DocumentId, TaskId};
use crate::store::{DocumentStore, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};
use tracing::info;

/// Opaque per-client handle supplied externally (cookie value, CLI profile).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One client's context: its document and replay cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub document_id: DocumentId,
    #[serde(default)]
    pub cursor: Cursor,
}

impl Session {
    /// A fresh session at the present.
    #[must_use]
    pub const fn new(document_id: DocumentId) -> Self {
        Self {
            document_id,
            cursor: Cursor::new(),
        }
    }
}

/// Registry of live sessions, keyed by session id.
///
/// All access goes through the registry lock, so concurrent requests for
/// the same session (double-click, multiple tabs) cannot lose cursor
/// updates.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<SessionId, Session>>,
}

impl SessionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the session for `id`, creating it (and its backing document)
    /// on first contact.
    ///
    /// # Errors
    ///
    /// Propagates store failures from document creation.
    pub fn get_or_create<S, I>(
        &self,
        id: &SessionId,
        store: &S,
        identity: &I,
        seed_content: &str,
    ) -> Result<Session, StoreError>
    where
        S: DocumentStore,
        I: IdentityProvider,
    {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(session) = sessions.get(id) {
            return Ok(session.clone());
        }

        let owner = identity.display_name();
        let seed = Action::Add {
            id: TaskId::mint(),
            content: seed_content.to_string(),
        };
        let document_id = store.create_document(&owner, seed)?;
        info!(session = %id, document = %document_id, owner, "created document for new session");

        let session = Session::new(document_id);
        sessions.insert(id.clone(), session.clone());
        Ok(session)
    }

    /// Run `f` against the named session under the registry lock.
    ///
    /// Returns `None` if the session does not exist; create it first via
    /// [`Self::get_or_create`].
    pub fn with_session<R>(&self, id: &SessionId, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        sessions.get_mut(id).map(f)
    }
}
