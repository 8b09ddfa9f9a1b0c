//! When steps for kanban board BDD scenarios.

use super::world::{KanbanWorld, PendingAnswer, run_async};
use crm_board::board::{
    domain::TaskId, ports::StatusUpdateError, services::DragEndOutcome,
};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#"task {task_id:u64} is dropped on "{target}""#)]
fn task_dropped_on(
    world: &mut KanbanWorld,
    task_id: u64,
    target: String,
) -> Result<(), eyre::Report> {
    if !world.session.drag_start(TaskId::new(task_id)) {
        return Err(eyre::eyre!("task {task_id} could not be picked up"));
    }
    world.last_drag_end = Some(world.session.drag_end(Some(&target)));
    Ok(())
}

#[when("task {task_id:u64} is released outside the board")]
fn task_released_outside(world: &mut KanbanWorld, task_id: u64) -> Result<(), eyre::Report> {
    if !world.session.drag_start(TaskId::new(task_id)) {
        return Err(eyre::eyre!("task {task_id} could not be picked up"));
    }
    world.last_drag_end = Some(world.session.drag_end(None));
    Ok(())
}

#[when("task {task_id:u64} is picked up")]
fn task_picked_up(world: &mut KanbanWorld, task_id: u64) {
    let _started = world.session.drag_start(TaskId::new(task_id));
}

#[when("the backend answers")]
fn backend_answers(world: &mut KanbanWorld) -> Result<(), eyre::Report> {
    match world.pending_answer.take() {
        Some(PendingAnswer::Accept(held)) => held.succeed(),
        Some(PendingAnswer::Refuse(held, message)) => {
            held.fail(StatusUpdateError::rejected(Some(403), message));
        }
        None => {}
    }

    let Some(DragEndOutcome::Dispatched(transition)) = world.last_drag_end.take() else {
        return Err(eyre::eyre!("no transition was dispatched"));
    };
    let outcome = run_async(transition.wait()).wrap_err("wait for transition to settle")?;
    world.last_outcome = Some(outcome);
    Ok(())
}
