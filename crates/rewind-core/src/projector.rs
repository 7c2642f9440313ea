//! Deterministic replay of an action sequence into current task state.
//!
//! [`project`] is a pure fold: no I/O, no clock, no randomness. Given the
//! same ordered action slice it always produces the same map, which is what
//! makes exact replay — and therefore time travel — possible.
//!
//! # Rules
//!
//! | Action | Effect |
//! |---|---|
//! | `Add` | insert/overwrite `{content, checked: false}` — re-add resets |
//! | `Delete` | remove if present, silent no-op otherwise |
//! | `Edit` | update content only if present, silently ignored otherwise |
//! | `Check`/`Uncheck` | set flag only if present, silently ignored otherwise |
//! | `Unknown` | skipped — unknown actions never abort replay |
//!
//! Inapplicable references are a policy decision, not an error condition:
//! a log written by a newer or concurrent writer must still replay cleanly.

use crate::action::Action;
use crate::model::{Task, TaskMap};
use tracing::trace;

/// Replay `actions` in order into the derived task map.
///
/// Output iteration order is first-appearance order: a re-added live id
/// keeps its slot, a deleted-then-re-added id moves to the end.
#[must_use]
pub fn project(actions: &[Action]) -> TaskMap {
    let mut tasks = TaskMap::new();
    for action in actions {
        apply(&mut tasks, action);
    }
    tasks
}

/// Apply a single action to `tasks` — the fold step of [`project`].
pub fn apply(tasks: &mut TaskMap, action: &Action) {
    match action {
        Action::Add { id, content } => {
            tasks.insert(id.clone(), Task::new(content.clone()));
        }
        Action::Delete { id } => {
            // shift_remove keeps the relative order of the survivors.
            tasks.shift_remove(id);
        }
        Action::Edit { id, content } => {
            if let Some(task) = tasks.get_mut(id) {
                task.content.clone_from(content);
            }
        }
        Action::Check { id } => {
            if let Some(task) = tasks.get_mut(id) {
                task.checked = true;
            }
        }
        Action::Uncheck { id } => {
            if let Some(task) = tasks.get_mut(id) {
                task.checked = false;
            }
        }
        Action::Unknown(_) => {
            trace!(kind = action.kind(), "skipping unrecognized action");
        }
    }
}
