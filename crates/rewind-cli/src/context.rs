//! Per-invocation workspace: config, store, and the persisted session.
//!
//! The session file under `<dir>/sessions/<name>.json` plays the cookie's
//! role: it remembers which document this terminal talks to and where its
//! time-travel cursor sits between invocations.

use anyhow::{Context as _, Result, bail};
use rewind_core::config::{CONFIG_FILE, Config};
use rewind_core::identity::WordlistIdentity;
use rewind_core::{
    DocumentStore, Engine, ErrorCode, LogStore, Session, SessionId, SessionRegistry, TaskId,
    TaskMap,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Everything a command handler needs, resolved once in `main`.
pub struct Context {
    pub engine: Engine<LogStore>,
    pub session: Session,
    session_path: PathBuf,
}

impl Context {
    /// Resolve the store directory, open the store, and load or create the
    /// named session.
    ///
    /// Directory precedence: `--dir` flag, then `REWIND_DIR`, then
    /// `rewind.toml`, then `.rewind`.
    pub fn load(dir_flag: Option<&Path>, session_name: &str) -> Result<Self> {
        let config = Config::load(Path::new(CONFIG_FILE))?;
        let dir = dir_flag.map_or_else(|| config.store_dir(), Path::to_path_buf);
        let store = LogStore::open(&dir).context("opening the action log store")?;

        let sessions_dir = dir.join("sessions");
        fs::create_dir_all(&sessions_dir)
            .with_context(|| format!("creating {}", sessions_dir.display()))?;
        let session_path = sessions_dir.join(format!("{session_name}.json"));

        let session = if session_path.exists() {
            let raw = fs::read_to_string(&session_path)
                .with_context(|| format!("reading session file {}", session_path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing session file {}", session_path.display()))?
        } else {
            debug!(session = session_name, "first contact, creating document");
            let registry = SessionRegistry::new();
            registry.get_or_create(
                &SessionId::new(session_name),
                &store,
                &WordlistIdentity,
                &config.seed.content,
            )?
        };

        Ok(Self {
            engine: Engine::new(store),
            session,
            session_path,
        })
    }

    /// Persist the session (document id + cursor offset) for the next
    /// invocation.
    pub fn save_session(&self) -> Result<()> {
        let raw = serde_json::to_string_pretty(&self.session)?;
        fs::write(&self.session_path, raw)
            .with_context(|| format!("writing session file {}", self.session_path.display()))
    }

    /// Total number of logged actions for this session's document.
    pub fn log_len(&self) -> Result<usize> {
        Ok(self.engine.store().read(&self.session.document_id)?.len())
    }

    /// The tasks currently visible through this session's cursor, plus the
    /// full log length.
    pub fn current_view(&self) -> Result<(TaskMap, usize)> {
        let log = self.engine.store().read(&self.session.document_id)?;
        let len = log.len();
        let view = self
            .engine
            .view_current(&self.session.document_id, &self.session.cursor)?;
        Ok((view, len))
    }

    /// Expand a possibly abbreviated task id against the current view.
    ///
    /// Exact matches win; otherwise the prefix must select exactly one
    /// visible task.
    pub fn resolve_task_id(&self, raw: &str) -> Result<TaskId> {
        let (view, _) = self.current_view()?;
        if view.contains_key(&TaskId::new_unchecked(raw)) {
            return Ok(TaskId::new_unchecked(raw));
        }
        let matches: Vec<&TaskId> = view
            .keys()
            .filter(|id| id.as_str().starts_with(raw))
            .collect();
        match matches.as_slice() {
            [only] => Ok((*only).clone()),
            [] => bail!("no task matches '{raw}'"),
            many => bail!(
                "[{}] '{raw}' matches {} tasks, give more characters",
                ErrorCode::AmbiguousTaskId.code(),
                many.len(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rewind_core::{Action, Cursor, DocumentStore};

    fn seeded_context(dir: &Path) -> Context {
        let ctx = Context::load(Some(dir), "test").expect("load context");
        ctx.save_session().expect("save");
        ctx
    }

    #[test]
    fn first_load_seeds_one_task() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let ctx = seeded_context(tmp.path());
        let (view, len) = ctx.current_view().expect("view");
        assert_eq!(len, 1);
        assert_eq!(view.len(), 1);
        let (_, task) = view.first().expect("seed task");
        assert_eq!(task.content, "feed the cat");
    }

    #[test]
    fn session_survives_a_reload() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let first = seeded_context(tmp.path());
        let doc = first.session.document_id.clone();
        drop(first);

        let second = Context::load(Some(tmp.path()), "test").expect("reload");
        assert_eq!(second.session.document_id, doc);
    }

    #[test]
    fn distinct_session_names_get_distinct_documents() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let a = Context::load(Some(tmp.path()), "a").expect("a");
        a.save_session().expect("save a");
        let b = Context::load(Some(tmp.path()), "b").expect("b");
        assert_ne!(a.session.document_id, b.session.document_id);
    }

    #[test]
    fn cursor_offset_round_trips_through_the_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut ctx = seeded_context(tmp.path());
        ctx.session.cursor = Cursor::at_offset(1);
        ctx.save_session().expect("save");

        let reloaded = Context::load(Some(tmp.path()), "test").expect("reload");
        assert_eq!(reloaded.session.cursor.offset(), 1);
    }

    #[test]
    fn prefix_resolution() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let ctx = seeded_context(tmp.path());
        ctx.engine
            .store()
            .append(
                &ctx.session.document_id,
                Action::Add {
                    id: TaskId::new_unchecked("aardvark"),
                    content: "x".into(),
                },
            )
            .expect("append");
        ctx.engine
            .store()
            .append(
                &ctx.session.document_id,
                Action::Add {
                    id: TaskId::new_unchecked("aardwolf"),
                    content: "y".into(),
                },
            )
            .expect("append");

        assert_eq!(
            ctx.resolve_task_id("aardv").expect("unique prefix").as_str(),
            "aardvark"
        );
        assert_eq!(
            ctx.resolve_task_id("aardvark").expect("exact").as_str(),
            "aardvark"
        );
        let err = ctx.resolve_task_id("aard").expect_err("ambiguous");
        assert!(err.to_string().contains("E2004"));
        assert!(ctx.resolve_task_id("zzz").is_err());
    }
}
