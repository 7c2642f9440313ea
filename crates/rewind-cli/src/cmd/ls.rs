//! `rwd ls` — show the tasks visible at the session's cursor.

use crate::context::Context;
use crate::output::{OutputMode, TaskListOutput, render_task_list};

pub fn run_ls(ctx: &Context, output: OutputMode) -> anyhow::Result<()> {
    let (view, log_len) = ctx.current_view()?;
    let list = TaskListOutput::from_view(&view, ctx.session.cursor, log_len);
    render_task_list(output, &list)
}
