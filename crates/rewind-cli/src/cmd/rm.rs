//! `rwd rm` — delete a task.
//!
//! Deleting an id with no visible task is still recorded; the projector
//! treats it as a no-op.

use crate::context::Context;
use crate::output::{OutputMode, TaskListOutput, render_task_list};
use clap::Args;
use rewind_core::Action;

#[derive(Args, Debug)]
pub struct RmArgs {
    /// Task id, or any unique prefix of one.
    pub id: String,
}

pub fn run_rm(args: &RmArgs, ctx: &mut Context, output: OutputMode) -> anyhow::Result<()> {
    let id = ctx.resolve_task_id(&args.id)?;
    let view = ctx.engine.mutate(
        &ctx.session.document_id,
        &mut ctx.session.cursor,
        Action::Delete { id },
    )?;
    ctx.save_session()?;

    let list = TaskListOutput::from_view(&view, ctx.session.cursor, ctx.log_len()?);
    render_task_list(output, &list)
}
