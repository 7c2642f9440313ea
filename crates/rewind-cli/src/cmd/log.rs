//! `rwd log` — dump the raw action log, oldest first.
//!
//! Debugging aid: shows every recorded action with its position and marks
//! where the session's cursor currently cuts the log.

use crate::context::Context;
use crate::output::{OutputMode, render};
use rewind_core::{Action, DocumentStore};
use serde::Serialize;
use std::io::Write as _;

#[derive(Serialize)]
struct LogOutput {
    actions: Vec<Action>,
    offset: usize,
}

pub fn run_log(ctx: &Context, output: OutputMode) -> anyhow::Result<()> {
    let actions = ctx.engine.store().read(&ctx.session.document_id)?;
    let offset = ctx.session.cursor.offset();
    let visible = ctx.session.cursor.view_len(actions.len());

    render(output, &LogOutput { actions, offset }, |o, w| {
        for (i, action) in o.actions.iter().enumerate() {
            let marker = if i < visible { ' ' } else { '~' };
            writeln!(w, "{marker}{:>4}  {action}", i + 1)?;
        }
        if o.offset > 0 {
            writeln!(w, "cursor is {} step(s) in the past", o.offset)?;
        }
        Ok(())
    })
}
