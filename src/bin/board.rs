//! Operator CLI for a project's kanban board.
//!
//! Usage:
//!
//! ```text
//! board [--config <path>] show <project-id>
//! board [--config <path>] move <project-id> <task-id> <drop-target>
//! ```
//!
//! `drop-target` is a column id (`pending`, `in-progress`, `review`,
//! `closed`) or the id of another task on the board. Settings are read from
//! the optional config file and `CRM_BOARD_*` environment variables; log
//! verbosity follows `RUST_LOG`.

use std::{
    io::{self, Write},
    path::PathBuf,
    sync::Arc,
};

use clap::{Parser, Subcommand};
use crm_board::{
    board::{
        adapters::{http::HttpBoardClient, memory::LogNotifier},
        domain::{ProjectId, TaskId},
        services::{BoardSession, DragEndOutcome, TransitionResult},
    },
    config::BoardConfig,
};
use eyre::{WrapErr, bail};
use mockable::DefaultClock;
use tracing_subscriber::EnvFilter;

type Session = BoardSession<HttpBoardClient, LogNotifier, DefaultClock>;

#[derive(Parser, Debug)]
#[command(name = "board", about = "Inspect and move tasks on a CRM project board")]
struct Cli {
    /// Optional configuration file (TOML, YAML or JSON).
    #[arg(long, short)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the board's four columns.
    Show { project_id: u64 },
    /// Drag a task onto a column or another task.
    Move {
        project_id: u64,
        task_id: u64,
        drop_target: String,
    },
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = BoardConfig::load(cli.config.as_deref()).wrap_err("loading configuration")?;
    let client = Arc::new(HttpBoardClient::from_config(&config).wrap_err("building HTTP client")?);

    match cli.command {
        Command::Show { project_id } => {
            let session = open_board(&config, &client, ProjectId::new(project_id)).await?;
            print_board(&session)?;
        }
        Command::Move {
            project_id,
            task_id,
            drop_target,
        } => {
            let mut session = open_board(&config, &client, ProjectId::new(project_id)).await?;
            move_task(&mut session, TaskId::new(task_id), &drop_target).await?;
        }
    }
    Ok(())
}

async fn open_board(
    config: &BoardConfig,
    client: &Arc<HttpBoardClient>,
    project_id: ProjectId,
) -> eyre::Result<Session> {
    let session = BoardSession::new(
        project_id,
        Arc::clone(client),
        Arc::new(LogNotifier),
        Arc::new(DefaultClock),
    )
    .with_company(config.company_id());
    session
        .load_from(client.as_ref(), config.page_size)
        .await
        .wrap_err_with(|| format!("loading tasks of project {project_id}"))?;
    Ok(session)
}

fn print_board(session: &Session) -> eyre::Result<()> {
    let mut out = io::stdout().lock();
    session.with_columns(|columns| -> io::Result<()> {
        for column in columns.iter() {
            writeln!(out, "{} ({})", column.id().title(), column.len())?;
            for task in column.by_deadline() {
                let deadline = task.deadline().map_or_else(
                    || "no deadline".to_owned(),
                    |at| at.format("%Y-%m-%d").to_string(),
                );
                writeln!(
                    out,
                    "  #{} {} [{}] {}",
                    task.task_id(),
                    task.task_name(),
                    task.priority_label(),
                    deadline
                )?;
            }
        }
        Ok(())
    })?;
    Ok(())
}

async fn move_task(session: &mut Session, task_id: TaskId, drop_target: &str) -> eyre::Result<()> {
    if !session.drag_start(task_id) {
        bail!("task {task_id} is not on the board");
    }
    let message = match session.drag_end(Some(drop_target)) {
        DragEndOutcome::NotDragging => bail!("no drag in progress"),
        DragEndOutcome::Cancelled { .. } => {
            bail!("{drop_target:?} is neither a column nor a task on the board")
        }
        DragEndOutcome::Unchanged { .. } => format!("Task {task_id} is already in that column"),
        DragEndOutcome::Dispatched(dispatched) => {
            let outcome = dispatched.wait().await?;
            match outcome.result {
                TransitionResult::Committed => format!(
                    "Task updated: #{} {} -> {} (settled {} after {} ms)",
                    outcome.task_id,
                    outcome.previous_status,
                    outcome.requested_status,
                    outcome.settled_at.format("%H:%M:%S"),
                    outcome.elapsed().num_milliseconds()
                ),
                TransitionResult::RolledBack { error, .. } => bail!(
                    "{} (task #{} kept status {:?})",
                    error.user_message(),
                    outcome.task_id,
                    outcome.previous_status
                ),
            }
        }
    };
    writeln!(io::stdout().lock(), "{message}")?;
    Ok(())
}
