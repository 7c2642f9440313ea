//! The time-travel cursor: how many trailing actions are hidden from replay.
//!
//! The log is append-only and monotonically growing, so the meaningful
//! replay points are bounded by the empty prefix (offset = log length) and
//! the present (offset = 0). Both ends clamp: stepping back past the seed
//! state stays at the seed state, stepping forward at the present stays at
//! the present. An unclamped offset would compute a negative or oversized
//! prefix, which is not a meaningful replay point.

use serde::{Deserialize, Serialize};

/// Navigation direction for the time-travel entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Hide one more trailing action.
    Back,
    /// Reveal one hidden trailing action.
    Forward,
}

/// Per-session replay offset: the count of most-recent actions currently
/// excluded from projection.
///
/// Session-local and ephemeral; resets to the present whenever an action is
/// appended for the session's document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    offset: usize,
}

impl Cursor {
    /// A cursor at the present (offset 0).
    #[must_use]
    pub const fn new() -> Self {
        Self { offset: 0 }
    }

    /// Restore a cursor from a persisted offset.
    #[must_use]
    pub const fn at_offset(offset: usize) -> Self {
        Self { offset }
    }

    /// Current offset.
    #[must_use]
    pub const fn offset(self) -> usize {
        self.offset
    }

    /// True when the full log would be replayed.
    #[must_use]
    pub const fn is_at_present(self) -> bool {
        self.offset == 0
    }

    /// Step one action into the past, clamped at the empty prefix.
    pub fn back(&mut self, log_len: usize) {
        self.offset = (self.offset + 1).min(log_len);
    }

    /// Step one action toward the present, clamped at offset 0.
    pub fn forward(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    /// Apply one navigation step.
    pub fn step(&mut self, direction: Direction, log_len: usize) {
        match direction {
            Direction::Back => self.back(log_len),
            Direction::Forward => self.forward(),
        }
    }

    /// Length of the log prefix to feed the projector.
    ///
    /// Saturates so a cursor that outlived a shorter log (e.g. restored from
    /// a stale session file) still yields a valid prefix.
    #[must_use]
    pub const fn view_len(self, log_len: usize) -> usize {
        log_len.saturating_sub(self.offset)
    }

    /// Snap to the present. Invoked as part of every mutating operation.
    pub fn reset_to_present(&mut self) {
        self.offset = 0;
    }
}
