//! Then steps for kanban board BDD scenarios.

use super::world::KanbanWorld;
use crm_board::board::{
    domain::{DragState, TaskId},
    ports::StatusUpdateRequest,
    services::DragEndOutcome,
};
use rstest_bdd_macros::then;

#[then(r#"task {task_id:u64} has status "{status}""#)]
fn task_has_status(world: &KanbanWorld, task_id: u64, status: String) -> Result<(), eyre::Report> {
    let actual = world.status_of(task_id);
    if actual.as_deref() != Some(status.as_str()) {
        return Err(eyre::eyre!(
            "expected task {task_id} to have status {status:?}, found {actual:?}"
        ));
    }
    Ok(())
}

#[then(r#"the backend received an update for task {task_id:u64} to "{status}""#)]
fn backend_received_update(
    world: &KanbanWorld,
    task_id: u64,
    status: String,
) -> Result<(), eyre::Report> {
    let requests = world.updater.requests()?;
    let expected = StatusUpdateRequest::new(TaskId::new(task_id), status);
    if requests != [expected.clone()] {
        return Err(eyre::eyre!("expected only {expected:?}, got {requests:?}"));
    }
    Ok(())
}

#[then(r#"the notification for task {task_id:u64} reads "{message}""#)]
fn notification_reads(
    world: &KanbanWorld,
    task_id: u64,
    message: String,
) -> Result<(), eyre::Report> {
    let last = world
        .notifier
        .last()
        .ok_or_else(|| eyre::eyre!("no notification was delivered"))?;
    if last.task_id() != TaskId::new(task_id) || last.message() != message {
        return Err(eyre::eyre!(
            "expected {message:?} for task {task_id}, got {last:?}"
        ));
    }
    Ok(())
}

#[then("the drag ends without a move")]
fn drag_ends_without_move(world: &KanbanWorld) -> Result<(), eyre::Report> {
    match &world.last_drag_end {
        Some(DragEndOutcome::Unchanged { .. }) => Ok(()),
        other => Err(eyre::eyre!("expected an unchanged drop, got {other:?}")),
    }
}

#[then("the drag is cancelled")]
fn drag_is_cancelled(world: &KanbanWorld) -> Result<(), eyre::Report> {
    match &world.last_drag_end {
        Some(DragEndOutcome::Cancelled { .. }) => Ok(()),
        other => Err(eyre::eyre!("expected a cancelled drop, got {other:?}")),
    }
}

#[then("no status update was sent")]
fn no_update_sent(world: &KanbanWorld) -> Result<(), eyre::Report> {
    let requests = world.updater.requests()?;
    if !requests.is_empty() {
        return Err(eyre::eyre!("expected no status update, got {requests:?}"));
    }
    Ok(())
}

#[then("the board is unchanged")]
fn board_is_unchanged(world: &KanbanWorld) -> Result<(), eyre::Report> {
    let initial = world
        .initial_board
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing initial board snapshot"))?;
    if world.session.snapshot() != *initial {
        return Err(eyre::eyre!("board changed: {:?}", world.session.snapshot()));
    }
    Ok(())
}

#[then("the board is idle")]
fn board_is_idle(world: &KanbanWorld) -> Result<(), eyre::Report> {
    if world.session.drag_state() != DragState::Idle {
        return Err(eyre::eyre!(
            "expected no active drag, found {:?}",
            world.session.drag_state()
        ));
    }
    Ok(())
}
