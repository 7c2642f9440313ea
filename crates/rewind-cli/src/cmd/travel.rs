//! `rwd back` / `rwd forward` — move the time-travel cursor.
//!
//! Navigation only repositions the view; the action log is never touched.
//! Steps past either end clamp silently.

use crate::context::Context;
use crate::output::{OutputMode, TaskListOutput, render_task_list};
use rewind_core::Direction;

pub fn run_back(ctx: &mut Context, output: OutputMode) -> anyhow::Result<()> {
    step(ctx, output, Direction::Back)
}

pub fn run_forward(ctx: &mut Context, output: OutputMode) -> anyhow::Result<()> {
    step(ctx, output, Direction::Forward)
}

fn step(ctx: &mut Context, output: OutputMode, direction: Direction) -> anyhow::Result<()> {
    let view = ctx.engine.navigate(
        &ctx.session.document_id,
        &mut ctx.session.cursor,
        direction,
    )?;
    ctx.save_session()?;

    let list = TaskListOutput::from_view(&view, ctx.session.cursor, ctx.log_len()?);
    render_task_list(output, &list)
}
