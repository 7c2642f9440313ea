//! `rwd add` — append a new task.

use crate::context::Context;
use crate::output::{OutputMode, TaskListOutput, render, render_task_list};
use clap::Args;
use rewind_core::{Action, TaskId};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Task text. Free-form; newlines and tabs are preserved.
    pub content: String,
}

#[derive(Serialize)]
struct AddOutput {
    id: String,
    #[serde(flatten)]
    list: TaskListOutput,
}

pub fn run_add(args: &AddArgs, ctx: &mut Context, output: OutputMode) -> anyhow::Result<()> {
    let id = TaskId::mint();
    let view = ctx.engine.mutate(
        &ctx.session.document_id,
        &mut ctx.session.cursor,
        Action::Add {
            id: id.clone(),
            content: args.content.clone(),
        },
    )?;
    ctx.save_session()?;

    let list = TaskListOutput::from_view(&view, ctx.session.cursor, ctx.log_len()?);
    if output.is_json() {
        render(output, &AddOutput { id: id.to_string(), list }, |_, _| Ok(()))
    } else {
        println!("added {}", &id.as_str()[..8]);
        render_task_list(output, &list)
    }
}
