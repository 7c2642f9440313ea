//! The three operations the core exposes to its caller.
//!
//! - [`Engine::mutate`] — append an action, snap the cursor to the present,
//!   return the full-log projection.
//! - [`Engine::view_current`] — project the cursor's prefix of the log.
//! - [`Engine::navigate`] — step the cursor and project the result; never
//!   touches the log.
//!
//! Appends always target the true end of the log, regardless of where the
//! cursor points. A user who stepped back three actions and then adds a
//! task does not branch history: the new action lands after the existing
//! tail and the cursor snaps to 0, so the next view shows everything.
//! History stays strictly linear.

use crate::action::Action;
use crate::cursor::{Cursor, Direction};
use crate::error::ErrorCode;
use crate::model::{DocumentId, TaskMap};
use crate::projector::project;
use crate::store::{DocumentStore, StoreError};
use tracing::debug;

/// Errors surfaced by the engine. Store failures are fatal for the current
/// request and propagate unchanged; the engine never retries.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EngineError {
    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Store(err) => err.code(),
        }
    }
}

/// Event-sourcing engine over a document store.
pub struct Engine<S> {
    store: S,
}

impl<S: DocumentStore> Engine<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store (e.g. for session creation).
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Append `action` to the document's log, reset the cursor to the
    /// present, and return the freshly projected full-log view.
    ///
    /// # Errors
    ///
    /// Propagates store failures; an unknown document id is
    /// [`StoreError::DocumentNotFound`].
    pub fn mutate(
        &self,
        document: &DocumentId,
        cursor: &mut Cursor,
        action: Action,
    ) -> Result<TaskMap, EngineError> {
        let kind = action.kind().to_owned();
        let len = self.store.append(document, action)?;
        cursor.reset_to_present();
        debug!(document = %document, kind, len, "appended action");

        let actions = self.store.read(document)?;
        Ok(project(&actions))
    }

    /// Project the view the cursor currently selects.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn view_current(
        &self,
        document: &DocumentId,
        cursor: &Cursor,
    ) -> Result<TaskMap, EngineError> {
        let actions = self.store.read(document)?;
        let view = cursor.view_len(actions.len());
        Ok(project(&actions[..view]))
    }

    /// Step the cursor one action back or forward (clamped against the
    /// current log length) and return the resulting view. The log itself is
    /// never modified.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn navigate(
        &self,
        document: &DocumentId,
        cursor: &mut Cursor,
        direction: Direction,
    ) -> Result<TaskMap, EngineError> {
        let actions = self.store.read(document)?;
        cursor.step(direction, actions.len());
        debug!(document = %document, offset = cursor.offset(), "navigated history");

        let view = cursor.view_len(actions.len());
        Ok(project(&actions[..view]))
    }
}
