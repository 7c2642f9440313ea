//! Shared output layer for human/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: a checkbox list for humans, or stable JSON for scripts.

use rewind_core::{Cursor, TaskMap};
use serde::Serialize;
use std::io::{self, Write};

/// The two output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-optimized output (checkbox rows, short ids).
    Human,
    /// Machine-readable JSON (one object per invocation).
    Json,
}

impl OutputMode {
    /// Returns `true` if JSON output was requested.
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Render a serializable value to stdout in the requested format.
///
/// In JSON mode, the value is serialized with `serde_json`. In human mode,
/// the provided `human_fn` closure produces the text output.
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    human_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        }
        OutputMode::Human => human_fn(value, &mut out)?,
    }
    Ok(())
}

/// A structured error for stderr. The `error_code` carries the machine
/// code (`E####`) so scripts don't have to parse messages.
#[derive(Debug, Serialize)]
pub struct CliError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            error_code: None,
        }
    }

    pub fn with_details(
        message: impl Into<String>,
        suggestion: impl Into<String>,
        error_code: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            suggestion: Some(suggestion.into()),
            error_code: Some(error_code.into()),
        }
    }
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    if mode.is_json() {
        serde_json::to_writer_pretty(&mut out, error)?;
        writeln!(out)?;
    } else {
        writeln!(out, "error: {}", error.message)?;
        if let Some(suggestion) = &error.suggestion {
            writeln!(out, "  hint: {suggestion}")?;
        }
    }
    Ok(())
}

/// The view every command that shows tasks emits: the projected tasks plus
/// where the cursor sits.
#[derive(Debug, Serialize)]
pub struct TaskListOutput {
    pub tasks: Vec<TaskRow>,
    pub offset: usize,
    pub log_len: usize,
}

/// One projected task, flattened for output.
#[derive(Debug, Serialize)]
pub struct TaskRow {
    pub id: String,
    pub content: String,
    pub checked: bool,
}

impl TaskListOutput {
    #[must_use]
    pub fn from_view(view: &TaskMap, cursor: Cursor, log_len: usize) -> Self {
        let tasks = view
            .iter()
            .map(|(id, task)| TaskRow {
                id: id.as_str().to_owned(),
                content: task.content.clone(),
                checked: task.checked,
            })
            .collect();
        Self {
            tasks,
            offset: cursor.offset(),
            log_len,
        }
    }
}

/// Print the checkbox list. Ids are shown truncated; any unique prefix is
/// accepted back as input.
pub fn render_task_list(mode: OutputMode, output: &TaskListOutput) -> anyhow::Result<()> {
    render(mode, output, |o, w| {
        for row in &o.tasks {
            let mark = if row.checked { 'x' } else { ' ' };
            let short = &row.id[..row.id.len().min(8)];
            writeln!(w, "[{mark}] {short}  {}", row.content)?;
        }
        if o.tasks.is_empty() {
            writeln!(w, "(no tasks)")?;
        }
        if o.offset > 0 {
            // A stale session file can carry an offset larger than the log;
            // saturate like Cursor::view_len instead of underflowing.
            let visible = o.log_len.saturating_sub(o.offset);
            writeln!(w, "-- viewing {visible} of {} actions --", o.log_len)?;
        }
        Ok(())
    })
}
