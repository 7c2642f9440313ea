//! `rwd check` / `rwd uncheck` — flip a task's completion flag.

use crate::context::Context;
use crate::output::{OutputMode, TaskListOutput, render_task_list};
use clap::Args;
use rewind_core::{Action, TaskId};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Task id, or any unique prefix of one.
    pub id: String,
}

pub fn run_check(args: &CheckArgs, ctx: &mut Context, output: OutputMode) -> anyhow::Result<()> {
    flip(args, ctx, output, |id| Action::Check { id })
}

pub fn run_uncheck(args: &CheckArgs, ctx: &mut Context, output: OutputMode) -> anyhow::Result<()> {
    flip(args, ctx, output, |id| Action::Uncheck { id })
}

fn flip(
    args: &CheckArgs,
    ctx: &mut Context,
    output: OutputMode,
    action: impl FnOnce(TaskId) -> Action,
) -> anyhow::Result<()> {
    let id = ctx.resolve_task_id(&args.id)?;
    let view = ctx.engine.mutate(
        &ctx.session.document_id,
        &mut ctx.session.cursor,
        action(id),
    )?;
    ctx.save_session()?;

    let list = TaskListOutput::from_view(&view, ctx.session.cursor, ctx.log_len()?);
    render_task_list(output, &list)
}
