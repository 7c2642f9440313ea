#![forbid(unsafe_code)]

mod cmd;
mod context;
mod output;

use clap::{Parser, Subcommand};
use context::Context;
use output::{CliError, OutputMode, render_error};
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "rewind: an event-sourced task list with time travel",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Store directory (overrides REWIND_DIR and rewind.toml).
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Session name. Each session has its own task list and cursor.
    #[arg(short, long, global = true, default_value = "default")]
    session: String,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags.
    const fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Add a task",
        after_help = "EXAMPLES:\n    # Add a task\n    rwd add \"water the plants\"\n\n    # Emit machine-readable output\n    rwd add \"water the plants\" --json"
    )]
    Add(cmd::add::AddArgs),

    #[command(
        about = "Delete a task",
        after_help = "EXAMPLES:\n    # Delete by unique id prefix\n    rwd rm 3fa8"
    )]
    Rm(cmd::rm::RmArgs),

    #[command(
        about = "Replace a task's text",
        after_help = "EXAMPLES:\n    # Edit by unique id prefix\n    rwd edit 3fa8 \"water the plants twice\""
    )]
    Edit(cmd::edit::EditArgs),

    #[command(about = "Mark a task as done")]
    Check(cmd::check::CheckArgs),

    #[command(about = "Mark a task as not done")]
    Uncheck(cmd::check::CheckArgs),

    #[command(
        about = "List tasks at the current point in time",
        after_help = "EXAMPLES:\n    # List the visible tasks\n    rwd ls\n\n    # Emit machine-readable output\n    rwd ls --json"
    )]
    Ls,

    #[command(about = "Step one action into the past")]
    Back,

    #[command(about = "Step one action toward the present")]
    Forward,

    #[command(about = "Dump the raw action log")]
    Log,
}

fn init_tracing(quiet: bool) {
    let filter = EnvFilter::try_from_env("REWIND_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if quiet {
            "error"
        } else if env::var("DEBUG").is_ok() {
            "rewind=debug,info"
        } else {
            "rewind=info,warn"
        })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    if cli.verbose {
        info!("verbose mode enabled");
    }

    let output = cli.output_mode();
    match run(&cli, output) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            let cli_error = CliError::new(format!("{err:#}"));
            // Rendering the error can itself fail on a closed pipe, at
            // which point there is nothing left to report.
            let _ = render_error(output, &cli_error);
            std::process::ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, output: OutputMode) -> anyhow::Result<()> {
    let mut ctx = Context::load(cli.dir.as_deref(), &cli.session)?;
    ctx.save_session()?;

    match &cli.command {
        Commands::Add(args) => cmd::add::run_add(args, &mut ctx, output),
        Commands::Rm(args) => cmd::rm::run_rm(args, &mut ctx, output),
        Commands::Edit(args) => cmd::edit::run_edit(args, &mut ctx, output),
        Commands::Check(args) => cmd::check::run_check(args, &mut ctx, output),
        Commands::Uncheck(args) => cmd::check::run_uncheck(args, &mut ctx, output),
        Commands::Ls => cmd::ls::run_ls(&ctx, output),
        Commands::Back => cmd::travel::run_back(&mut ctx, output),
        Commands::Forward => cmd::travel::run_forward(&mut ctx, output),
        Commands::Log => cmd::log::run_log(&ctx, output),
    }
}
