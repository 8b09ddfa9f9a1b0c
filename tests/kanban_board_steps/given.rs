//! Given steps for kanban board BDD scenarios.

use super::world::{KanbanWorld, PendingAnswer};
use crm_board::board::domain::{TaskId, TaskRecord};
use rstest_bdd_macros::given;

#[given(r#"a board with task {first:u64} in "{first_status}" and task {second:u64} in "{second_status}""#)]
fn board_with_two_tasks(
    world: &mut KanbanWorld,
    first: u64,
    first_status: String,
    second: u64,
    second_status: String,
) {
    world.session.load(vec![
        TaskRecord::new(TaskId::new(first), format!("Task {first}"), first_status),
        TaskRecord::new(TaskId::new(second), format!("Task {second}"), second_status),
    ]);
    world.initial_board = Some(world.session.snapshot());
}

#[given("the backend will accept the next update")]
fn backend_accepts(world: &mut KanbanWorld) -> Result<(), eyre::Report> {
    let held = world.updater.hold_next()?;
    world.pending_answer = Some(PendingAnswer::Accept(held));
    Ok(())
}

#[given(r#"the backend will refuse the next update with "{message}""#)]
fn backend_refuses(world: &mut KanbanWorld, message: String) -> Result<(), eyre::Report> {
    let held = world.updater.hold_next()?;
    world.pending_answer = Some(PendingAnswer::Refuse(held, message));
    Ok(())
}
