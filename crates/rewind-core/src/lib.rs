//! rewind-core: an event-sourced task list with time travel.
//!
//! Task state is never stored directly. Every mutation is an immutable
//! [`Action`] appended to a per-document action log, and the displayed list
//! is always a projection computed by replaying a prefix of that log. A
//! per-session [`Cursor`] controls how many trailing actions the replay
//! hides, which is all "time travel" is — stepping the cursor never deletes
//! anything.
//!
//! The usual flow:
//!
//! 1. [`session::SessionRegistry::get_or_create`] resolves a client to a
//!    document, creating and seeding one on first contact.
//! 2. [`Engine::mutate`] appends an action and snaps the cursor to the
//!    present; [`Engine::view_current`] and [`Engine::navigate`] only read.
//! 3. [`projector::project`] is the pure fold both of them share.
//!
//! # Conventions
//!
//! - **Errors**: `thiserror` enums at module seams, `anyhow::Result` at
//!   binary boundaries.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).

pub mod action;
pub mod config;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod identity;
pub mod model;
pub mod projector;
pub mod session;
pub mod store;

pub use action::Action;
pub use cursor::{Cursor, Direction};
pub use engine::{Engine, EngineError};
pub use error::ErrorCode;
pub use model::{DocumentId, Task, TaskId, TaskMap};
pub use projector::{apply, project};
pub use session::{Session, SessionId, SessionRegistry};
pub use store::{DocumentStore, LogStore, MemoryStore, StoreError};
