//! `rwd edit` — replace a task's text.

use crate::context::Context;
use crate::output::{OutputMode, TaskListOutput, render_task_list};
use clap::Args;
use rewind_core::Action;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Task id, or any unique prefix of one.
    pub id: String,

    /// Replacement text. The checked state is untouched.
    pub content: String,
}

pub fn run_edit(args: &EditArgs, ctx: &mut Context, output: OutputMode) -> anyhow::Result<()> {
    let id = ctx.resolve_task_id(&args.id)?;
    let view = ctx.engine.mutate(
        &ctx.session.document_id,
        &mut ctx.session.cursor,
        Action::Edit {
            id,
            content: args.content.clone(),
        },
    )?;
    ctx.save_session()?;

    let list = TaskListOutput::from_view(&view, ctx.session.cursor, ctx.log_len()?);
    render_task_list(output, &list)
}
